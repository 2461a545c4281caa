//! Game settings and preferences
//!
//! Stored as JSON. The file is optional; anything missing or broken falls
//! back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DEFAULT_FPS;
use crate::sim::GameOptions;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "ZOMBIE_SMASH_SETTINGS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Splat sound volume (0.0 - 1.0)
    pub splat_volume: f32,
    /// Button click volume (0.0 - 1.0)
    pub click_volume: f32,
    pub muted: bool,

    // === Visual Effects ===
    /// Screen shake on hits
    pub screen_shake: bool,
    /// Rainbow trail behind the pointer
    pub pointer_trail: bool,

    // === Runtime ===
    /// Fixed RNG seed; random per run when absent
    pub seed: Option<u64>,
    /// Target frame rate
    pub fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            music_volume: 0.5,
            splat_volume: 0.8,
            click_volume: 0.7,
            muted: false,

            screen_shake: true,
            pointer_trail: true,

            seed: None,
            fps: DEFAULT_FPS,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.clamp_volumes();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from the file named by `ZOMBIE_SMASH_SETTINGS`, or defaults
    pub fn load() -> Self {
        let Ok(path) = std::env::var(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_file(Path::new(&path)) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    fn clamp_volumes(&mut self) {
        for v in [
            &mut self.master_volume,
            &mut self.music_volume,
            &mut self.splat_volume,
            &mut self.click_volume,
        ] {
            *v = v.clamp(0.0, 1.0);
        }
        self.fps = self.fps.max(1);
    }

    /// Milliseconds per frame at the target rate
    pub fn frame_ms(&self) -> u64 {
        (1000 / self.fps.max(1)) as u64
    }

    pub fn game_options(&self) -> GameOptions {
        GameOptions {
            screen_shake: self.screen_shake,
            pointer_trail: self.pointer_trail,
        }
    }
}
