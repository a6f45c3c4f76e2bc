//! Audio cues and the playback collaborator
//!
//! The simulation only names sounds; a host-supplied `AudioSink` plays them.
//! `AudioManager` applies volume settings before forwarding.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    /// Ball breaks a brick
    Bleep,
    /// Ball hits a solid brick
    Solid,
    /// Power-up collected
    PowerUp,
    /// Ball bounces off the paddle
    Paddle,
    /// Background loop
    Music,
}

impl Sound {
    /// Asset file the resource collaborator knows this sound by
    pub fn file_name(self) -> &'static str {
        match self {
            Sound::Bleep => "bleep.mp3",
            Sound::Solid => "solid.wav",
            Sound::PowerUp => "powerup.wav",
            Sound::Paddle => "bleep.wav",
            Sound::Music => "breakout.mp3",
        }
    }

    pub fn is_music(self) -> bool {
        matches!(self, Sound::Music)
    }
}

/// Fire-and-forget playback
pub trait AudioSink {
    /// Start playing `sound` at `gain` (0.0 - 1.0). Music loops.
    fn play(&mut self, sound: Sound, gain: f32);
}

/// Sink that discards everything
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _sound: Sound, _gain: f32) {}
}

/// Volume control in front of an `AudioSink`
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effective volume for a sound
    pub fn gain_for(&self, sound: Sound) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if sound.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    /// Forward `sound` to the sink unless it would be silent
    pub fn play(&self, sink: &mut dyn AudioSink, sound: Sound) {
        let gain = self.gain_for(sound);
        if gain > 0.0 {
            sink.play(sound, gain);
        }
    }
}
