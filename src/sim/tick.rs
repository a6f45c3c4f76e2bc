//! Per-frame input handling and simulation update
//!
//! Frame order: `process_input` → `update` → render (external).

use super::collision::{Direction, circle_rect_collision};
use super::powerup::{EffectTargets, collect_powerups, spawn_powerups, update_powerups};
use super::state::{GameEvent, GamePhase, GameSession};
use crate::audio::Sound;
use crate::consts::*;
use crate::platform::input::{Keys, key_code};

/// Apply keyboard state for this frame.
///
/// Discrete actions (confirm, level select) fire once per press; paddle
/// movement and ball release poll every frame.
pub fn process_input(session: &mut GameSession, keys: &mut Keys, dt: f32) {
    match session.phase {
        GamePhase::Menu => {
            if keys.take_press(key_code::ENTER) {
                session.start();
            }
            if keys.take_press(key_code::W) {
                session.select_next_level();
            }
            if keys.take_press(key_code::S) {
                session.select_previous_level();
            }
        }
        GamePhase::Win => {
            if keys.take_press(key_code::ENTER) {
                session.effects.chaos = false;
                session.set_phase(GamePhase::Menu);
            }
        }
        GamePhase::Active => {
            let velocity = PADDLE_VELOCITY * dt;
            let mut delta = 0.0;
            if keys.is_down(key_code::A) {
                delta -= velocity;
            }
            if keys.is_down(key_code::D) {
                delta += velocity;
            }
            if delta != 0.0 {
                let moved = session.paddle.shift(delta, session.width);
                if session.ball.stuck {
                    session.ball.body.pos.x += moved;
                }
            }
            if keys.is_down(key_code::SPACE) {
                session.ball.stuck = false;
            }
        }
    }
}

/// Advance the simulation by `dt` seconds
pub fn update(session: &mut GameSession, dt: f32) {
    session.ball.move_within(dt, session.width);

    if session.phase == GamePhase::Active {
        resolve_brick_collisions(session);
        resolve_powerups(session, dt);
        resolve_paddle_collision(session);
        check_ball_lost(session);
        check_level_cleared(session);
    }

    session.effects.tick(dt);
}

/// Destroy or bounce off every brick the ball overlaps
fn resolve_brick_collisions(session: &mut GameSession) {
    let GameSession {
        levels,
        level_index,
        ball,
        powerups,
        effects,
        sprites,
        rng,
        ..
    } = session;
    let mut sounds = Vec::new();

    for brick in levels[*level_index].bricks.iter_mut().filter(|b| !b.destroyed) {
        let hit = circle_rect_collision(ball.center(), ball.radius(), brick.pos, brick.size);
        if !hit.hit {
            continue;
        }

        if brick.is_solid {
            effects.trigger_shake();
            sounds.push(Sound::Solid);
        } else {
            brick.destroyed = true;
            spawn_powerups(rng, brick.pos, sprites, powerups);
            sounds.push(Sound::Bleep);
        }

        if ball.pass_through && !brick.is_solid {
            continue;
        }

        // Reflect on the struck axis and push the ball back out of the brick
        let radius = ball.radius();
        let body = &mut ball.body;
        match hit.direction {
            Direction::Left | Direction::Right => {
                body.vel.x = -body.vel.x;
                let depth = radius - hit.penetration.x.abs();
                if hit.direction == Direction::Left {
                    body.pos.x -= depth;
                } else {
                    body.pos.x += depth;
                }
            }
            Direction::Up | Direction::Down => {
                body.vel.y = -body.vel.y;
                let depth = radius - hit.penetration.y.abs();
                if hit.direction == Direction::Up {
                    body.pos.y -= depth;
                } else {
                    body.pos.y += depth;
                }
            }
        }
    }

    for sound in sounds {
        session.play(sound);
    }
}

/// Pick up power-ups touching the paddle, then age and compact the collection
fn resolve_powerups(session: &mut GameSession, dt: f32) {
    let height = session.height;
    let GameSession {
        ball,
        paddle,
        effects,
        powerups,
        ..
    } = session;
    let mut targets = EffectTargets { ball, paddle, effects };

    let collected = collect_powerups(powerups, height, &mut targets);
    update_powerups(powerups, dt, &mut targets);

    for _ in collected {
        session.play(Sound::PowerUp);
    }
}

/// Bounce a free ball arriving on the paddle's top face
fn resolve_paddle_collision(session: &mut GameSession) {
    if session.ball.stuck {
        return;
    }
    let paddle = &session.paddle.body;
    let hit = circle_rect_collision(session.ball.center(), session.ball.radius(), paddle.pos, paddle.size);
    if hit.hit && hit.direction == Direction::Up {
        session.ball.bounce_off_paddle(&session.paddle);
        session.play(Sound::Paddle);
    }
}

/// Ball fell past the bottom edge: lose a life, game over at zero
fn check_ball_lost(session: &mut GameSession) {
    if session.ball.body.pos.y < session.height {
        return;
    }

    session.lives = session.lives.saturating_sub(1);
    log::info!("Ball lost, {} lives left", session.lives);
    session.emit(GameEvent::LifeLost { lives_left: session.lives });

    if session.lives == 0 {
        session.reset_level();
        session.set_phase(GamePhase::Menu);
    }
    session.reset_player();
}

fn check_level_cleared(session: &mut GameSession) {
    if session.phase == GamePhase::Active && session.level().is_completed() {
        log::info!("Level {} cleared", session.level_index + 1);
        session.reset_level();
        session.reset_player();
        session.effects.chaos = true;
        session.set_phase(GamePhase::Win);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::entity::SpriteSet;
    use crate::sim::level::Level;
    use crate::sim::powerup::{PowerUp, PowerUpKind};
    use glam::Vec2;

    /// Active session over a single custom level
    fn session_with(tiles: Vec<Vec<u32>>) -> GameSession {
        let settings = Settings::default();
        let sprites = SpriteSet::default();
        let level = Level::from_tiles(tiles, 800.0, 300.0, &sprites).unwrap();
        let mut session = GameSession::with_levels(&settings, sprites, vec![level]);
        session.phase = GamePhase::Active;
        session.drain_events();
        session
    }

    /// Place the free ball so its center is at `center`, moving with `vel`
    fn launch(session: &mut GameSession, center: Vec2, vel: Vec2) {
        let r = session.ball.radius();
        session.ball.body.pos = center - Vec2::splat(r);
        session.ball.body.vel = vel;
        session.ball.stuck = false;
    }

    fn sounds(session: &mut GameSession) -> Vec<Sound> {
        session
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::Sound(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_menu_confirm_starts_once() {
        let mut session = GameSession::new(&Settings::default(), SpriteSet::default());
        let mut keys = Keys::new();
        keys.press(key_code::W);
        process_input(&mut session, &mut keys, SIM_DT);
        process_input(&mut session, &mut keys, SIM_DT);
        // Held key only advances once
        assert_eq!(session.level_index, 1);

        keys.press(key_code::ENTER);
        process_input(&mut session, &mut keys, SIM_DT);
        assert_eq!(session.phase, GamePhase::Active);
    }

    #[test]
    fn test_paddle_moves_stuck_ball_along() {
        let mut session = session_with(vec![vec![2]]);
        let mut keys = Keys::new();
        let paddle_x = session.paddle.body.pos.x;
        let ball_x = session.ball.body.pos.x;

        keys.press(key_code::A);
        process_input(&mut session, &mut keys, 0.1);
        assert_eq!(session.paddle.body.pos.x, paddle_x - 50.0);
        assert_eq!(session.ball.body.pos.x, ball_x - 50.0);

        keys.release(key_code::A);
        keys.press(key_code::SPACE);
        process_input(&mut session, &mut keys, 0.1);
        assert!(!session.ball.stuck);

        keys.press(key_code::D);
        process_input(&mut session, &mut keys, 0.1);
        assert_eq!(session.paddle.body.pos.x, paddle_x);
        assert_eq!(session.ball.body.pos.x, ball_x - 50.0);
    }

    #[test]
    fn test_brick_hit_from_below_bounces_down() {
        // Bricks at x 200..400 and 600..800, y 0..150
        let mut session = session_with(vec![vec![0, 2, 0, 2], vec![0, 0, 0, 0]]);
        launch(&mut session, Vec2::new(300.0, 155.0), Vec2::new(0.0, -300.0));

        update(&mut session, 0.01);
        assert!(session.level().bricks[0].destroyed);
        assert!(session.ball.body.vel.y > 0.0);
        // Pushed out below the brick
        assert!(session.ball.center().y >= 150.0 + session.ball.radius() - 0.001);
        assert!(sounds(&mut session).contains(&Sound::Bleep));
    }

    #[test]
    fn test_side_hit_reverses_horizontal() {
        let mut session = session_with(vec![vec![0, 1, 0, 2], vec![0, 0, 0, 0]]);
        // Solid brick at x 200..400, y 0..150; ball approaching its left face
        launch(&mut session, Vec2::new(192.0, 75.0), Vec2::new(200.0, 0.0));

        update(&mut session, 0.001);
        assert!(!session.level().bricks[0].destroyed);
        assert!(session.ball.body.vel.x < 0.0);
        assert!((session.ball.center().x - (200.0 - session.ball.radius())).abs() < 0.01);
        assert!(session.effects.shake);
        assert!(sounds(&mut session).contains(&Sound::Solid));
    }

    #[test]
    fn test_pass_through_keeps_heading() {
        // Two stacked bricks in the first column plus one far right
        let mut session = session_with(vec![
            vec![2, 0, 0, 2],
            vec![2, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]);
        session.ball.pass_through = true;
        launch(&mut session, Vec2::new(100.0, 80.0), Vec2::new(0.0, -300.0));

        update(&mut session, 0.01);
        assert!(session.level().bricks[0].destroyed);
        assert!(session.level().bricks[2].destroyed);
        assert_eq!(session.phase, GamePhase::Active);
        assert_eq!(session.ball.body.vel, Vec2::new(0.0, -300.0));
    }

    #[test]
    fn test_pass_through_still_bounces_off_solid() {
        let mut session = session_with(vec![vec![1, 0, 0, 2], vec![0, 0, 0, 0]]);
        session.ball.pass_through = true;
        launch(&mut session, Vec2::new(100.0, 155.0), Vec2::new(0.0, -300.0));

        update(&mut session, 0.01);
        assert!(session.ball.body.vel.y > 0.0);
    }

    #[test]
    fn test_paddle_bounce_from_above() {
        let mut session = session_with(vec![vec![2]]);
        let paddle_top = session.paddle.body.pos.y;
        let paddle_center = session.paddle.body.center().x;
        launch(&mut session, Vec2::new(paddle_center, paddle_top - 10.0), Vec2::new(50.0, 350.0));
        let speed = session.ball.speed();

        update(&mut session, 0.001);
        assert!(session.ball.body.vel.y < 0.0);
        assert!((session.ball.speed() - speed).abs() < 0.01);
        assert!(sounds(&mut session).contains(&Sound::Paddle));
    }

    #[test]
    fn test_sticky_ball_reattaches_on_paddle() {
        let mut session = session_with(vec![vec![2]]);
        session.ball.sticky = true;
        let paddle_top = session.paddle.body.pos.y;
        let paddle_center = session.paddle.body.center().x;
        launch(&mut session, Vec2::new(paddle_center + 5.0, paddle_top - 10.0), Vec2::new(0.0, 350.0));

        update(&mut session, 0.001);
        assert!(session.ball.stuck);
        assert!(session.ball.body.vel.y < 0.0);
        assert!(session.ball.body.vel.x > 0.0);
    }

    #[test]
    fn test_paddle_ignores_side_contacts() {
        let paddle = session_with(vec![vec![2]]).paddle.body.clone();
        let left_face = Vec2::new(paddle.pos.x - 10.0, paddle.center().y);
        // Above the right corner but further out than up
        let near_corner = Vec2::new(paddle.pos.x + paddle.size.x + 12.0, paddle.pos.y - 2.0);

        for center in [left_face, near_corner] {
            let mut session = session_with(vec![vec![2]]);
            let vel = Vec2::new(50.0, 100.0);
            launch(&mut session, center, vel);

            update(&mut session, 0.001);
            assert_eq!(session.ball.body.vel, vel);
            assert!(!session.ball.stuck);
            assert!(!sounds(&mut session).contains(&Sound::Paddle));
        }
    }

    #[test]
    fn test_powerup_pickup_plays_sound() {
        let mut session = session_with(vec![vec![2]]);
        let pos = session.paddle.body.pos;
        session.powerups.push(PowerUp::new(PowerUpKind::PadSizeIncrease, pos, &session.sprites));

        update(&mut session, SIM_DT);
        assert_eq!(session.paddle.body.size.x, PADDLE_SIZE.x + PADDLE_GROWTH);
        assert!(session.powerups.is_empty());
        assert!(sounds(&mut session).contains(&Sound::PowerUp));
    }

    #[test]
    fn test_ball_lost_costs_a_life() {
        let mut session = session_with(vec![vec![2]]);
        launch(&mut session, Vec2::new(20.0, 650.0), Vec2::ZERO);

        update(&mut session, SIM_DT);
        assert_eq!(session.lives, START_LIVES - 1);
        assert_eq!(session.phase, GamePhase::Active);
        assert!(session.ball.stuck);
    }

    #[test]
    fn test_clearing_level_wins() {
        let mut session = session_with(vec![vec![2, 0], vec![0, 0]]);
        launch(&mut session, Vec2::new(200.0, 155.0), Vec2::new(0.0, -300.0));

        update(&mut session, 0.01);
        assert_eq!(session.phase, GamePhase::Win);
        assert!(session.effects.chaos);
        assert!(!session.level().is_completed());
        assert!(session.ball.stuck);

        let mut keys = Keys::new();
        keys.press(key_code::ENTER);
        process_input(&mut session, &mut keys, SIM_DT);
        assert_eq!(session.phase, GamePhase::Menu);
        assert!(!session.effects.chaos);
    }

    #[test]
    fn test_menu_does_not_resolve_collisions() {
        let mut session = session_with(vec![vec![2], vec![0]]);
        session.phase = GamePhase::Menu;
        launch(&mut session, Vec2::new(400.0, 155.0), Vec2::new(0.0, -300.0));

        update(&mut session, 0.01);
        assert!(!session.level().bricks[0].destroyed);
    }

    #[test]
    fn test_destroyed_bricks_are_ignored() {
        let mut session = session_with(vec![vec![2, 2], vec![0, 0]]);
        session.level_mut().bricks[0].destroyed = true;
        launch(&mut session, Vec2::new(200.0, 155.0), Vec2::new(0.0, -300.0));

        update(&mut session, 0.01);
        assert!(session.ball.body.vel.y < 0.0);
        assert!(!session.level().bricks[1].destroyed);
    }
}
