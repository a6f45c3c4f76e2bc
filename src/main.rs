//! Breakout headless runner
//!
//! Drives the game at the fixed simulation step with an autopilot at the
//! keyboard and recording collaborators in place of a window, GPU and
//! speakers. Useful for soak-testing levels and settings files.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use glam::{Vec2, Vec3};

use breakout::audio::{AudioSink, Sound};
use breakout::consts::SIM_DT;
use breakout::platform::key_code;
use breakout::renderer::{Resources, SpriteRenderer, TextRenderer};
use breakout::sim::{GameEvent, GamePhase, TextureHandle};
use breakout::{Game, Settings};

#[derive(Parser, Debug)]
#[command(about = "Run Breakout headless with an autopilot", version)]
struct Args {
    /// Settings JSON; defaults are used when omitted or unreadable
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 7200)]
    frames: u32,
    /// Override the power-up seed from the settings file
    #[arg(long)]
    seed: Option<u64>,
}

/// Hands out a distinct handle per texture name
#[derive(Default)]
struct HeadlessResources {
    handles: std::cell::RefCell<HashMap<String, TextureHandle>>,
}

impl Resources for HeadlessResources {
    fn texture(&self, name: &str) -> TextureHandle {
        let mut handles = self.handles.borrow_mut();
        let next = TextureHandle(handles.len() as u32);
        *handles.entry(name.to_string()).or_insert(next)
    }
}

#[derive(Default)]
struct FrameCounter {
    sprites: u64,
}

impl SpriteRenderer for FrameCounter {
    fn draw_sprite(&mut self, _texture: TextureHandle, _pos: Vec2, _size: Vec2, _rotation: f32, _tint: Vec3) {
        self.sprites += 1;
    }
}

struct TextCounter<'a>(&'a mut u64);

impl TextRenderer for TextCounter<'_> {
    fn render_text(&mut self, _text: &str, _x: f32, _y: f32, _scale: f32, _tint: Vec3) {
        *self.0 += 1;
    }
}

#[derive(Default)]
struct LogAudio {
    played: HashMap<Sound, u32>,
}

impl AudioSink for LogAudio {
    fn play(&mut self, sound: Sound, gain: f32) {
        log::debug!("play {} at {:.2}", sound.file_name(), gain);
        *self.played.entry(sound).or_default() += 1;
    }
}

/// Keyboard stand-in that chases the ball
#[derive(Default)]
struct Autopilot {
    held: Vec<i32>,
}

impl Autopilot {
    fn set(&mut self, game: &mut Game, code: i32, down: bool) {
        let held = self.held.contains(&code);
        if down && !held {
            game.key_event(code, true);
            self.held.push(code);
        } else if !down && held {
            game.key_event(code, false);
            self.held.retain(|&c| c != code);
        }
    }

    fn steer(&mut self, game: &mut Game) {
        match game.phase() {
            GamePhase::Menu | GamePhase::Win => {
                // tap: press on one frame, release on the next
                let tapping = self.held.contains(&key_code::ENTER);
                self.set(game, key_code::A, false);
                self.set(game, key_code::D, false);
                self.set(game, key_code::SPACE, false);
                self.set(game, key_code::ENTER, !tapping);
            }
            GamePhase::Active => {
                self.set(game, key_code::ENTER, false);
                let session = &game.session;
                let stuck = session.ball.stuck;
                let target = session.ball.center().x;
                let paddle = &session.paddle.body;
                let center = paddle.pos.x + paddle.size.x / 2.0;
                let slack = paddle.size.x / 4.0;
                let (left, right) = (target < center - slack, target > center + slack);
                self.set(game, key_code::SPACE, stuck);
                self.set(game, key_code::A, !stuck && left);
                self.set(game, key_code::D, !stuck && right);
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    log::info!("Breakout (headless) starting, seed {}", settings.seed);

    let resources = HeadlessResources::default();
    let mut game = Game::new(&settings, &resources);
    let mut autopilot = Autopilot::default();
    let mut sprites = FrameCounter::default();
    let mut text_lines = 0u64;
    let mut audio = LogAudio::default();

    let mut wins = 0u32;
    let mut game_overs = 0u32;
    let mut frames = 0u32;
    while frames < args.frames && !game.should_quit() {
        autopilot.steer(&mut game);
        let events = game.frame(SIM_DT, &mut sprites, &mut TextCounter(&mut text_lines), &mut audio);
        for event in events {
            match event {
                GameEvent::PhaseChanged { to: GamePhase::Win, .. } => wins += 1,
                GameEvent::LifeLost { lives_left: 0 } => game_overs += 1,
                GameEvent::LifeLost { lives_left } => log::info!("Life lost, {} left", lives_left),
                _ => {}
            }
        }
        frames += 1;
    }

    log::info!(
        "Ran {} frames: {} wins, {} game overs, level {} at {} bricks left",
        frames,
        wins,
        game_overs,
        game.session.level_index + 1,
        game.session.level().remaining()
    );
    log::info!("Drew {} sprites and {} text lines", sprites.sprites, text_lines);
    let mut played: Vec<_> = audio.played.into_iter().collect();
    played.sort_by_key(|(sound, _)| sound.file_name());
    for (sound, count) in played {
        log::info!("{:>6} x {}", count, sound.file_name());
    }
    Ok(())
}
