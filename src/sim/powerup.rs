//! Power-ups: spawning, pickup, timed activation and expiry
//!
//! Several pickups of the same kind may be active at once. Each keeps its own
//! timer; the effect is only switched off when the last active one of that
//! kind expires. Removal from the collection is mark-then-compact: an entry
//! is dropped once it is `destroyed` and no longer `activated`.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::rect_rect_overlap;
use super::entity::{Entity, SpriteSet, WHITE};
use super::paddle::Paddle;
use super::state::Effects;
use crate::consts::*;

/// Paddle tint while sticky is active
pub const STICKY_TINT: Vec3 = Vec3::new(1.0, 0.5, 1.0);
/// Ball tint while pass-through is active
pub const PASS_THROUGH_TINT: Vec3 = Vec3::new(1.0, 0.5, 0.5);

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
}

impl PowerUpKind {
    pub const COUNT: usize = 6;

    /// Spawn trial order
    pub const ALL: [PowerUpKind; Self::COUNT] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    pub fn index(self) -> usize {
        match self {
            PowerUpKind::Speed => 0,
            PowerUpKind::Sticky => 1,
            PowerUpKind::PassThrough => 2,
            PowerUpKind::PadSizeIncrease => 3,
            PowerUpKind::Confuse => 4,
            PowerUpKind::Chaos => 5,
        }
    }

    /// "1 in N" odds of spawning from a destroyed brick
    pub fn spawn_chance(self) -> u32 {
        match self {
            PowerUpKind::Confuse | PowerUpKind::Chaos => NEGATIVE_SPAWN_CHANCE,
            _ => POSITIVE_SPAWN_CHANCE,
        }
    }

    /// Effect duration in seconds (0 = instantaneous)
    pub fn duration(self) -> f32 {
        match self {
            PowerUpKind::Speed => 10.0,
            PowerUpKind::Sticky => 20.0,
            PowerUpKind::PassThrough => 10.0,
            PowerUpKind::PadSizeIncrease => 0.0,
            PowerUpKind::Confuse => 15.0,
            PowerUpKind::Chaos => 15.0,
        }
    }

    pub fn tint(self) -> Vec3 {
        match self {
            PowerUpKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerUpKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerUpKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerUpKind::PadSizeIncrease => Vec3::new(1.0, 0.6, 0.4),
            PowerUpKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerUpKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
        }
    }

    pub fn texture_name(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "powerup_speed",
            PowerUpKind::Sticky => "powerup_sticky",
            PowerUpKind::PassThrough => "powerup_passthrough",
            PowerUpKind::PadSizeIncrease => "powerup_increase",
            PowerUpKind::Confuse => "powerup_confuse",
            PowerUpKind::Chaos => "powerup_chaos",
        }
    }
}

/// A falling (or collected and running) power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Entity,
    pub kind: PowerUpKind,
    /// Seconds of effect remaining
    pub duration: f32,
    /// Collected and still running
    pub activated: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2, sprites: &SpriteSet) -> Self {
        Self {
            body: Entity::new(pos, POWERUP_SIZE, sprites.powerup(kind))
                .with_tint(kind.tint())
                .with_velocity(POWERUP_VELOCITY),
            kind,
            duration: kind.duration(),
            activated: false,
        }
    }

    /// Safe to drop from the collection
    #[inline]
    pub fn is_spent(&self) -> bool {
        self.body.destroyed && !self.activated
    }
}

/// Everything a power-up effect can touch
pub struct EffectTargets<'a> {
    pub ball: &'a mut Ball,
    pub paddle: &'a mut Paddle,
    pub effects: &'a mut Effects,
}

/// Whether any power-up of `kind` is currently running
pub fn is_active(powerups: &[PowerUp], kind: PowerUpKind) -> bool {
    powerups.iter().any(|p| p.activated && p.kind == kind)
}

/// Roll one independent "1 in N" trial per kind for a destroyed brick at `pos`
pub fn spawn_powerups<R: Rng>(rng: &mut R, pos: Vec2, sprites: &SpriteSet, powerups: &mut Vec<PowerUp>) {
    for kind in PowerUpKind::ALL {
        if rng.random_range(0..kind.spawn_chance()) == 0 {
            log::debug!("Spawned {:?} at ({:.0}, {:.0})", kind, pos.x, pos.y);
            powerups.push(PowerUp::new(kind, pos, sprites));
        }
    }
}

/// Apply the effect of a freshly collected power-up.
///
/// `sibling_active` is whether another power-up of the same kind was already
/// running; a speed boost is then only extended, not compounded.
pub fn activate(kind: PowerUpKind, sibling_active: bool, targets: &mut EffectTargets<'_>) {
    match kind {
        PowerUpKind::Speed => {
            if !sibling_active {
                targets.ball.body.vel *= SPEED_FACTOR;
            }
        }
        PowerUpKind::Sticky => {
            targets.ball.sticky = true;
            targets.paddle.set_tint(STICKY_TINT);
        }
        PowerUpKind::PassThrough => {
            targets.ball.pass_through = true;
            targets.ball.body.tint = PASS_THROUGH_TINT;
        }
        PowerUpKind::PadSizeIncrease => {
            targets.paddle.body.size.x += PADDLE_GROWTH;
        }
        PowerUpKind::Confuse => {
            if !targets.effects.chaos {
                targets.effects.confuse = true;
            }
        }
        PowerUpKind::Chaos => {
            if !targets.effects.confuse {
                targets.effects.chaos = true;
            }
        }
    }
}

/// Revert the effect of the last expiring power-up of `kind`
pub fn deactivate(kind: PowerUpKind, targets: &mut EffectTargets<'_>) {
    match kind {
        PowerUpKind::Speed => {
            targets.ball.body.vel /= SPEED_FACTOR;
        }
        PowerUpKind::Sticky => {
            targets.ball.sticky = false;
            targets.paddle.set_tint(WHITE);
        }
        PowerUpKind::PassThrough => {
            targets.ball.pass_through = false;
            targets.ball.body.tint = WHITE;
        }
        // Permanent for the rest of the level
        PowerUpKind::PadSizeIncrease => {}
        PowerUpKind::Confuse => {
            targets.effects.confuse = false;
        }
        PowerUpKind::Chaos => {
            targets.effects.chaos = false;
        }
    }
}

/// Mark power-ups that left the screen and collect the ones touching the paddle.
///
/// Returns the kinds collected this frame.
pub fn collect_powerups(
    powerups: &mut [PowerUp],
    screen_height: f32,
    targets: &mut EffectTargets<'_>,
) -> Vec<PowerUpKind> {
    let mut collected = Vec::new();
    for i in 0..powerups.len() {
        if powerups[i].body.destroyed {
            continue;
        }
        if powerups[i].body.pos.y >= screen_height {
            powerups[i].body.destroyed = true;
            continue;
        }

        let paddle = &targets.paddle.body;
        let body = &powerups[i].body;
        if rect_rect_overlap(paddle.pos, paddle.size, body.pos, body.size) {
            let kind = powerups[i].kind;
            let sibling_active = is_active(powerups, kind);
            activate(kind, sibling_active, targets);

            let powerup = &mut powerups[i];
            powerup.body.destroyed = true;
            powerup.activated = true;
            log::info!("Collected {:?} ({:.0}s)", kind, powerup.duration);
            collected.push(kind);
        }
    }
    collected
}

/// Advance positions and timers, revert expired effects, then drop spent entries
pub fn update_powerups(powerups: &mut Vec<PowerUp>, dt: f32, targets: &mut EffectTargets<'_>) {
    for i in 0..powerups.len() {
        let powerup = &mut powerups[i];
        powerup.body.pos += powerup.body.vel * dt;
        if !powerup.activated {
            continue;
        }

        powerup.duration -= dt;
        if powerup.duration <= 0.0 {
            powerup.activated = false;
            let kind = powerup.kind;
            if is_active(powerups, kind) {
                log::debug!("{:?} expired, another still running", kind);
            } else {
                log::debug!("{:?} expired", kind);
                deactivate(kind, targets);
            }
        }
    }
    powerups.retain(|p| !p.is_spent());
}
