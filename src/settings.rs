//! Game settings and preferences
//!
//! Stored as JSON next to the best score file. Missing fields take their
//! defaults so older files keep loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::PersistError;

/// Default settings file name
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Screen shake on impacts and blasts
    pub screen_shake: bool,
    /// Explosion particles
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (disables shake)
    pub reduced_motion: bool,

    /// Fixed run seed; a fresh one per run when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            particles: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            reduced_motion: false,

            seed: None,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let Ok(json) = fs::read_to_string(path) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
