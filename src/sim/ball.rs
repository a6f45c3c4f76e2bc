//! The ball: a circular entity with wall bounces and paddle redirection

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, TextureHandle, WHITE};
use super::paddle::Paddle;
use crate::consts::*;

/// A ball entity
///
/// `body.size` is always `(2 * radius, 2 * radius)`; the radius is fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub body: Entity,
    radius: f32,
    /// Resting on the paddle; follows paddle movement until released
    pub stuck: bool,
    /// Re-attach to the paddle after each paddle bounce
    pub sticky: bool,
    /// Plough through destructible bricks without bouncing
    pub pass_through: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, vel: Vec2, sprite: TextureHandle) -> Self {
        Self {
            body: Entity::new(pos, Vec2::splat(radius * 2.0), sprite).with_velocity(vel),
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    /// Ball resting on top of the paddle's center
    pub fn on_paddle(paddle: &Paddle, sprite: TextureHandle) -> Self {
        Self::new(Self::rest_position(paddle, BALL_RADIUS), BALL_RADIUS, INITIAL_BALL_VELOCITY, sprite)
    }

    /// Top-left position that places a ball of `radius` on the paddle's center
    pub fn rest_position(paddle: &Paddle, radius: f32) -> Vec2 {
        paddle.body.pos + Vec2::new(paddle.body.size.x / 2.0 - radius, -radius * 2.0)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.pos + Vec2::splat(self.radius)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.body.vel.length()
    }

    /// Integrate one step and bounce off the left, right and top walls.
    ///
    /// The bottom edge is open: crossing it is a lost ball, handled by the session.
    pub fn move_within(&mut self, dt: f32, bounds_width: f32) -> Vec2 {
        if !self.stuck {
            let body = &mut self.body;
            body.pos += body.vel * dt;

            if body.pos.x <= 0.0 {
                body.vel.x = body.vel.x.abs();
                body.pos.x = 0.0;
            } else if body.pos.x + body.size.x >= bounds_width {
                body.vel.x = -body.vel.x.abs();
                body.pos.x = bounds_width - body.size.x;
            }

            if body.pos.y <= 0.0 {
                body.vel.y = body.vel.y.abs();
                body.pos.y = 0.0;
            }
        }
        self.body.pos
    }

    /// Put the ball back at `pos` with `vel`, stuck to the paddle
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.body.pos = pos;
        self.body.vel = vel;
        self.stuck = true;
    }

    /// Clear power-up modifiers and their tint
    pub fn clear_modifiers(&mut self) {
        self.sticky = false;
        self.pass_through = false;
        self.body.tint = WHITE;
    }

    /// Redirect off the paddle based on where the ball struck it
    pub fn bounce_off_paddle(&mut self, paddle: &Paddle) {
        let half_width = paddle.body.size.x / 2.0;
        let distance = self.center().x - paddle.body.center().x;
        let percentage = if half_width > 0.0 {
            (distance / half_width).clamp(-1.0, 1.0)
        } else {
            0.0
        };
        self.redirect(percentage);
    }

    /// Aim the ball upward with a horizontal component proportional to `percentage`
    /// (-1 = paddle's left edge, 1 = right edge), keeping the current speed.
    pub fn redirect(&mut self, percentage: f32) {
        let speed = self.speed();
        let aimed = Vec2::new(
            INITIAL_BALL_VELOCITY.x * percentage * BOUNCE_STRENGTH,
            -self.body.vel.y.abs(),
        );
        self.body.vel = aimed.try_normalize().unwrap_or(Vec2::NEG_Y) * speed;

        if self.sticky {
            self.stuck = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn free_ball(pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(pos, BALL_RADIUS, vel, TextureHandle::default());
        ball.stuck = false;
        ball
    }

    #[test]
    fn test_size_matches_radius() {
        let ball = free_ball(Vec2::ZERO, Vec2::ZERO);
        assert_eq!(ball.body.size, Vec2::splat(25.0));
        assert_eq!(ball.center(), Vec2::splat(12.5));
    }

    #[test]
    fn test_left_wall_reflection() {
        let mut ball = free_ball(Vec2::new(-1.0, 300.0), Vec2::new(-100.0, 0.0));
        ball.move_within(SIM_DT, SCREEN_WIDTH);
        assert_eq!(ball.body.pos.x, 0.0);
        assert_eq!(ball.body.vel.x, 100.0);
    }

    #[test]
    fn test_right_wall_reflection() {
        let mut ball = free_ball(Vec2::new(780.0, 300.0), Vec2::new(300.0, 0.0));
        ball.move_within(0.1, SCREEN_WIDTH);
        assert_eq!(ball.body.pos.x, SCREEN_WIDTH - 25.0);
        assert_eq!(ball.body.vel.x, -300.0);
    }

    #[test]
    fn test_top_wall_reflection_but_open_bottom() {
        let mut ball = free_ball(Vec2::new(400.0, 2.0), Vec2::new(0.0, -100.0));
        ball.move_within(0.1, SCREEN_WIDTH);
        assert_eq!(ball.body.pos.y, 0.0);
        assert_eq!(ball.body.vel.y, 100.0);

        let mut ball = free_ball(Vec2::new(400.0, 590.0), Vec2::new(0.0, 100.0));
        ball.move_within(0.5, SCREEN_WIDTH);
        assert_eq!(ball.body.pos.y, 640.0);
        assert_eq!(ball.body.vel.y, 100.0);
    }

    #[test]
    fn test_stuck_ball_does_not_move() {
        let mut ball = Ball::new(Vec2::new(100.0, 100.0), BALL_RADIUS, INITIAL_BALL_VELOCITY, TextureHandle::default());
        let pos = ball.move_within(1.0, SCREEN_WIDTH);
        assert_eq!(pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_reset_sticks_ball() {
        let mut ball = free_ball(Vec2::new(5.0, 5.0), Vec2::new(1.0, 1.0));
        ball.reset(Vec2::new(50.0, 60.0), INITIAL_BALL_VELOCITY);
        assert!(ball.stuck);
        assert_eq!(ball.body.pos, Vec2::new(50.0, 60.0));
        assert_eq!(ball.body.vel, INITIAL_BALL_VELOCITY);
    }

    #[test]
    fn test_center_hit_goes_straight_up() {
        let mut ball = free_ball(Vec2::ZERO, Vec2::new(30.0, 400.0));
        let speed = ball.speed();
        ball.redirect(0.0);
        assert!(ball.body.vel.x.abs() < 0.001);
        assert!((ball.body.vel.y + speed).abs() < 0.01);
    }

    #[test]
    fn test_edge_hit_deflects_sideways() {
        let paddle = Paddle::new(Vec2::new(800.0, 600.0), TextureHandle::default());
        let mut ball = free_ball(Vec2::ZERO, Vec2::new(0.0, 350.0));
        // Ball center over the paddle's right edge
        ball.body.pos.x = paddle.body.pos.x + paddle.body.size.x - ball.radius();
        ball.bounce_off_paddle(&paddle);
        assert!(ball.body.vel.x > 0.0);
        assert!(ball.body.vel.y < 0.0);
        assert!(!ball.stuck);
    }

    #[test]
    fn test_sticky_bounce_reattaches() {
        let mut ball = free_ball(Vec2::ZERO, Vec2::new(0.0, 350.0));
        ball.sticky = true;
        ball.redirect(0.5);
        assert!(ball.stuck);
        assert!(ball.body.vel.y < 0.0);
    }

    proptest! {
        #[test]
        fn prop_paddle_bounce_preserves_speed(
            percentage in -1.0f32..=1.0,
            vx in -600.0f32..600.0,
            vy in -600.0f32..600.0,
        ) {
            let mut ball = free_ball(Vec2::ZERO, Vec2::new(vx, vy));
            let speed = ball.speed();
            ball.redirect(percentage);
            prop_assert!((ball.speed() - speed).abs() <= speed * 1e-4 + 1e-3);
            prop_assert!(ball.body.vel.y <= 0.0);
        }
    }
}
