//! Simulation module
//!
//! All gameplay logic lives here. This module stays deterministic:
//! - Seeded RNG only
//! - Mark-then-compact removal, never mid-iteration
//! - No rendering, audio or platform dependencies (cues go out as events)

pub mod ball;
pub mod collision;
pub mod entity;
pub mod level;
pub mod paddle;
pub mod powerup;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use collision::{CollisionResult, Direction, circle_rect_collision, rect_rect_overlap};
pub use entity::{Entity, SpriteSet, TextureHandle, WHITE};
pub use level::{BUILTIN_LEVELS, Level, TileGrid, parse_tiles, read_tiles};
pub use paddle::Paddle;
pub use powerup::{EffectTargets, PowerUp, PowerUpKind};
pub use state::{Effects, GameEvent, GamePhase, GameSession};
pub use tick::{process_input, update};
