//! Base positional record shared by bricks, the paddle, the ball and power-ups

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::powerup::PowerUpKind;

/// Neutral sprite tint
pub const WHITE: Vec3 = Vec3::ONE;

/// Opaque texture id handed out by the resource collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// A sprite-bearing object in screen space (origin top-left, +y down)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Rotation in degrees
    pub rotation: f32,
    pub tint: Vec3,
    pub sprite: TextureHandle,
    /// Indestructible (bricks only)
    pub is_solid: bool,
    /// Logically removed; physically dropped on the owner's next compaction
    pub destroyed: bool,
}

impl Entity {
    pub fn new(pos: Vec2, size: Vec2, sprite: TextureHandle) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            rotation: 0.0,
            tint: WHITE,
            sprite,
            is_solid: false,
            destroyed: false,
        }
    }

    pub fn with_tint(mut self, tint: Vec3) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn solid(mut self) -> Self {
        self.is_solid = true;
        self
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Every texture the simulation hands to its entities, resolved once up front
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpriteSet {
    pub background: TextureHandle,
    pub block: TextureHandle,
    pub block_solid: TextureHandle,
    pub paddle: TextureHandle,
    pub ball: TextureHandle,
    /// Indexed by `PowerUpKind::index`
    pub powerups: [TextureHandle; PowerUpKind::COUNT],
}

impl SpriteSet {
    pub const BACKGROUND: &'static str = "background";
    pub const BLOCK: &'static str = "block";
    pub const BLOCK_SOLID: &'static str = "block_solid";
    pub const PADDLE: &'static str = "paddle";
    pub const BALL: &'static str = "face";

    /// Look up every texture by name exactly once
    pub fn resolve(mut lookup: impl FnMut(&str) -> TextureHandle) -> Self {
        Self {
            background: lookup(Self::BACKGROUND),
            block: lookup(Self::BLOCK),
            block_solid: lookup(Self::BLOCK_SOLID),
            paddle: lookup(Self::PADDLE),
            ball: lookup(Self::BALL),
            powerups: PowerUpKind::ALL.map(|kind| lookup(kind.texture_name())),
        }
    }

    pub fn powerup(&self, kind: PowerUpKind) -> TextureHandle {
        self.powerups[kind.index()]
    }
}
