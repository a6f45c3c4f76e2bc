//! Game host: owns the session and drives one frame at a time
//!
//! A platform layer forwards key events, calls `frame` once per display
//! refresh and supplies the rendering and audio collaborators.

use crate::audio::{AudioManager, AudioSink};
use crate::platform::{Keys, key_code};
use crate::renderer::{self, Resources, SpriteRenderer, TextRenderer};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GamePhase, GameSession};

/// Top-level game object
pub struct Game {
    pub session: GameSession,
    pub keys: Keys,
    audio: AudioManager,
    quit: bool,
}

impl Game {
    pub fn new(settings: &Settings, resources: &dyn Resources) -> Self {
        let sprites = renderer::resolve_sprites(resources);
        Self {
            session: GameSession::new(settings, sprites),
            keys: Keys::new(),
            audio: AudioManager::from_settings(settings),
            quit: false,
        }
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    /// Record a key transition. Escape requests shutdown.
    pub fn key_event(&mut self, code: i32, pressed: bool) {
        if code == key_code::ESCAPE && pressed {
            log::info!("Quit requested");
            self.quit = true;
        }
        if pressed {
            self.keys.press(code);
        } else {
            self.keys.release(code);
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    /// Run input, simulation and drawing for one frame, then play queued sounds.
    ///
    /// Returns the non-audio events raised during the frame.
    pub fn frame(
        &mut self,
        dt: f32,
        sprites: &mut dyn SpriteRenderer,
        text: &mut dyn TextRenderer,
        sink: &mut dyn AudioSink,
    ) -> Vec<GameEvent> {
        sim::process_input(&mut self.session, &mut self.keys, dt);
        sim::update(&mut self.session, dt);
        renderer::render(&self.session, sprites, text);

        let mut events = self.session.drain_events();
        events.retain(|event| match event {
            GameEvent::Sound(sound) => {
                self.audio.play(sink, *sound);
                false
            }
            _ => true,
        });
        events
    }
}
