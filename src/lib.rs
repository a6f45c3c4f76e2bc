//! Breakout - a brick-breaker arcade simulation
//!
//! Core modules:
//! - `sim`: Simulation engine (collisions, power-ups, levels, game state)
//! - `platform`: Keyboard surface with debouncing of discrete actions
//! - `renderer`: Narrow sprite/text/texture collaborator interfaces and the draw pass
//! - `audio`: Sound cues and the playback collaborator interface
//! - `settings`: Data-driven configuration
//! - `game`: Host glue running one frame of input, update and render

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed frame timestep used by the headless runner
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Bricks occupy the top half of the screen
    pub const LEVEL_HEIGHT_FRACTION: f32 = 0.5;

    pub const START_LIVES: u32 = 3;

    /// Paddle defaults
    pub const PADDLE_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    /// Horizontal paddle speed (pixels/s)
    pub const PADDLE_VELOCITY: f32 = 500.0;
    /// Width added by each pad-size-increase pickup
    pub const PADDLE_GROWTH: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);
    /// Horizontal deflection multiplier for paddle hits
    pub const BOUNCE_STRENGTH: f32 = 2.0;

    /// Power-up defaults
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);
    /// Ball velocity multiplier applied by a speed pickup
    pub const SPEED_FACTOR: f32 = 1.2;
    /// "1 in N" odds for helpful pickups
    pub const POSITIVE_SPAWN_CHANCE: u32 = 75;
    /// "1 in N" odds for disruptive pickups (spawn more often)
    pub const NEGATIVE_SPAWN_CHANCE: u32 = 15;

    /// Screen shake length after hitting a solid brick (seconds)
    pub const SHAKE_TIME: f32 = 0.05;
}
