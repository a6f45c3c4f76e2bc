//! Game session state
//!
//! The session owns every mutable piece of simulation state for the duration
//! of a frame: levels, paddle, ball, power-ups and the visual-effect flags.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::entity::SpriteSet;
use super::level::{BUILTIN_LEVELS, Level, parse_tiles};
use super::paddle::Paddle;
use super::powerup::PowerUp;
use crate::audio::Sound;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen with level select
    Menu,
    /// Active gameplay
    Active,
    /// Level cleared
    Win,
}

/// Session-wide visual effect toggles, read by the renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    pub shake: bool,
    pub confuse: bool,
    pub chaos: bool,
    /// Seconds of shake remaining
    shake_time: f32,
}

impl Effects {
    pub fn trigger_shake(&mut self) {
        self.shake = true;
        self.shake_time = SHAKE_TIME;
    }

    /// Count down the shake timer
    pub fn tick(&mut self, dt: f32) {
        if self.shake_time > 0.0 {
            self.shake_time -= dt;
            if self.shake_time <= 0.0 {
                self.shake = false;
            }
        }
    }

    pub fn clear_distortions(&mut self) {
        self.confuse = false;
        self.chaos = false;
    }
}

/// Something the host should react to (audio cues, UI transitions)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Sound(Sound),
    PhaseChanged { from: GamePhase, to: GamePhase },
    LifeLost { lives_left: u32 },
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    pub phase: GamePhase,
    pub lives: u32,
    pub level_index: usize,
    /// Never empty; degenerate layouts are filtered at construction
    pub levels: Vec<Level>,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Unordered; spent entries are compacted each frame
    pub powerups: Vec<PowerUp>,
    pub effects: Effects,
    pub sprites: SpriteSet,
    pub width: f32,
    pub height: f32,
    start_lives: u32,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session from settings, loading level files and falling back to
    /// the built-in layouts for any that cannot be used.
    pub fn new(settings: &Settings, sprites: SpriteSet) -> Self {
        let levels = load_levels(settings, &sprites);
        Self::with_levels(settings, sprites, levels)
    }

    /// Create a session over already-built levels.
    ///
    /// Levels with no destructible bricks would count as completed immediately,
    /// so they are dropped; if nothing remains the built-in layouts are used.
    pub fn with_levels(settings: &Settings, sprites: SpriteSet, levels: Vec<Level>) -> Self {
        let screen = settings.screen_size();
        let mut levels: Vec<Level> = levels.into_iter().filter(|l| l.remaining() > 0).collect();
        if levels.is_empty() {
            log::warn!("No playable levels configured, using built-in layouts");
            levels = builtin_levels(screen, &sprites);
        }

        let paddle = Paddle::new(screen, sprites.paddle);
        let ball = Ball::on_paddle(&paddle, sprites.ball);
        let start_lives = settings.start_lives();

        let mut session = Self {
            phase: GamePhase::Menu,
            lives: start_lives,
            level_index: 0,
            levels,
            paddle,
            ball,
            powerups: Vec::new(),
            effects: Effects::default(),
            sprites,
            width: screen.x,
            height: screen.y,
            start_lives,
            rng: Pcg32::seed_from_u64(settings.seed),
            events: Vec::new(),
        };
        session.emit(GameEvent::Sound(Sound::Music));
        log::info!("Session ready: {} levels, {} lives", session.levels.len(), session.lives);
        session
    }

    #[inline]
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn start_lives(&self) -> u32 {
        self.start_lives
    }

    pub fn level(&self) -> &Level {
        &self.levels[self.level_index]
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.levels[self.level_index]
    }

    /// Select the next level, wrapping around
    pub fn select_next_level(&mut self) {
        self.level_index = (self.level_index + 1) % self.levels.len();
        log::info!("Selected level {}", self.level_index + 1);
    }

    /// Select the previous level, wrapping around
    pub fn select_previous_level(&mut self) {
        self.level_index = self.level_index.checked_sub(1).unwrap_or(self.levels.len() - 1);
        log::info!("Selected level {}", self.level_index + 1);
    }

    /// Restore the current level's full brick layout
    pub fn reset_level(&mut self) {
        self.level_mut().reset();
    }

    /// Put paddle and ball back on the bottom edge and cancel every power-up effect
    pub fn reset_player(&mut self) {
        let screen = self.screen_size();
        self.paddle.reset(screen);
        self.ball.reset(Ball::rest_position(&self.paddle, self.ball.radius()), INITIAL_BALL_VELOCITY);
        self.ball.clear_modifiers();
        self.effects.clear_distortions();
        self.powerups.clear();
    }

    /// Start a game from the menu, refilling lives after a game over
    pub fn start(&mut self) {
        if self.lives == 0 {
            self.lives = self.start_lives;
        }
        self.set_phase(GamePhase::Active);
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.emit(GameEvent::PhaseChanged { from: self.phase, to: phase });
            self.phase = phase;
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn play(&mut self, sound: Sound) {
        self.emit(GameEvent::Sound(sound));
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Brick area for a screen: full width, top portion of the height
fn level_extent(screen: Vec2) -> Vec2 {
    Vec2::new(screen.x, screen.y * LEVEL_HEIGHT_FRACTION)
}

fn builtin_level(index: usize, screen: Vec2, sprites: &SpriteSet) -> Option<Level> {
    let (name, text) = BUILTIN_LEVELS.get(index)?;
    let extent = level_extent(screen);
    match parse_tiles(text).and_then(|tiles| Level::from_tiles(tiles, extent.x, extent.y, sprites)) {
        Ok(level) => Some(level),
        Err(err) => {
            log::error!("Built-in level {} is invalid: {:#}", name, err);
            None
        }
    }
}

fn builtin_levels(screen: Vec2, sprites: &SpriteSet) -> Vec<Level> {
    (0..BUILTIN_LEVELS.len())
        .filter_map(|i| builtin_level(i, screen, sprites))
        .collect()
}

/// Load each configured level file, substituting the built-in layout at the
/// same position when a file is missing, malformed or cannot be won.
fn load_levels(settings: &Settings, sprites: &SpriteSet) -> Vec<Level> {
    let screen = settings.screen_size();
    let extent = level_extent(screen);

    let mut levels = Vec::new();
    for (i, path) in settings.levels.iter().enumerate() {
        let mut level = Level::new(sprites);
        if level.load_file(path, extent.x, extent.y) {
            if level.remaining() > 0 {
                levels.push(level);
                continue;
            }
            log::warn!("Level {} has no destructible bricks", path.display());
        }
        if let Some(fallback) = builtin_level(i, screen, sprites) {
            log::info!("Using built-in layout {} in place of {}", BUILTIN_LEVELS[i].0, path.display());
            levels.push(fallback);
        }
    }
    levels
}
