//! The player's paddle

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, TextureHandle, WHITE};
use crate::consts::PADDLE_SIZE;

/// The player's paddle, resting on the bottom edge of the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub body: Entity,
}

impl Paddle {
    pub fn new(screen: Vec2, sprite: TextureHandle) -> Self {
        Self {
            body: Entity::new(Self::spawn_position(screen), PADDLE_SIZE, sprite),
        }
    }

    /// Centered on the bottom edge
    pub fn spawn_position(screen: Vec2) -> Vec2 {
        Vec2::new(screen.x / 2.0 - PADDLE_SIZE.x / 2.0, screen.y - PADDLE_SIZE.y)
    }

    /// Restore default size, position and tint
    pub fn reset(&mut self, screen: Vec2) {
        self.body.size = PADDLE_SIZE;
        self.body.pos = Self::spawn_position(screen);
        self.body.tint = WHITE;
    }

    pub fn set_tint(&mut self, tint: Vec3) {
        self.body.tint = tint;
    }

    /// Move horizontally by `delta`, staying inside `[0, bounds_width]`.
    ///
    /// Returns the distance actually travelled so a stuck ball can follow.
    pub fn shift(&mut self, delta: f32, bounds_width: f32) -> f32 {
        let max_x = (bounds_width - self.body.size.x).max(0.0);
        let old_x = self.body.pos.x;
        self.body.pos.x = (old_x + delta).clamp(0.0, max_x);
        self.body.pos.x - old_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_spawn_centered_on_bottom() {
        let paddle = Paddle::new(SCREEN, TextureHandle::default());
        assert_eq!(paddle.body.pos, Vec2::new(350.0, 580.0));
        assert_eq!(paddle.body.size, PADDLE_SIZE);
    }

    #[test]
    fn test_shift_clamps_to_bounds() {
        let mut paddle = Paddle::new(SCREEN, TextureHandle::default());
        assert_eq!(paddle.shift(-100.0, SCREEN.x), -100.0);
        assert_eq!(paddle.shift(-1000.0, SCREEN.x), -250.0);
        assert_eq!(paddle.body.pos.x, 0.0);

        assert_eq!(paddle.shift(5000.0, SCREEN.x), 700.0);
        assert_eq!(paddle.body.pos.x, 700.0);
        assert_eq!(paddle.shift(10.0, SCREEN.x), 0.0);
    }

    #[test]
    fn test_reset_restores_size() {
        let mut paddle = Paddle::new(SCREEN, TextureHandle::default());
        paddle.body.size.x += 50.0;
        paddle.set_tint(Vec3::new(1.0, 0.5, 1.0));
        paddle.shift(-200.0, SCREEN.x);

        paddle.reset(SCREEN);
        assert_eq!(paddle.body.size, PADDLE_SIZE);
        assert_eq!(paddle.body.pos, Vec2::new(350.0, 580.0));
        assert_eq!(paddle.body.tint, WHITE);
    }
}
