//! Game settings
//!
//! Stored as JSON. Missing fields take their defaults, so older files keep working.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, START_LIVES};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub width: f32,
    pub height: f32,

    // === Gameplay ===
    /// Lives at the start of each game (at least 1)
    pub lives: u32,
    /// Seed for power-up spawn rolls
    pub seed: u64,
    /// Level files in play order
    pub levels: Vec<PathBuf>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,

            lives: START_LIVES,
            seed: 0x5EED,
            levels: ["one", "two", "three", "four"]
                .iter()
                .map(|name| PathBuf::from(format!("levels/{name}.lvl")))
                .collect(),

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn start_lives(&self) -> u32 {
        self.lives.max(1)
    }

    /// Read settings from a JSON file
    pub fn try_load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("invalid settings {}", path.display()))
    }

    /// Read settings, falling back to defaults if the file is missing or invalid
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("{:#}; using default settings", err);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("failed to write settings {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.screen_size(), Vec2::new(800.0, 600.0));
        assert_eq!(settings.start_lives(), 3);
        assert_eq!(settings.levels.len(), 4);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "lives": 5, "seed": 9 }"#).unwrap();
        assert_eq!(settings.lives, 5);
        assert_eq!(settings.seed, 9);
        assert_eq!(settings.width, SCREEN_WIDTH);
    }

    #[test]
    fn test_zero_lives_is_bumped() {
        let settings = Settings {
            lives: 0,
            ..Settings::default()
        };
        assert_eq!(settings.start_lives(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("breakout-settings-{}.json", std::process::id()));
        let settings = Settings {
            seed: 1234,
            muted: true,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = Path::new("/nonexistent/settings.json");
        assert!(Settings::try_load(path).is_err());
        assert_eq!(Settings::load(path), Settings::default());
    }
}
