//! Game settings and preferences
//!
//! Persisted as JSON next to the executable's working directory, separately
//! from the leaderboard. Missing or unreadable files fall back to defaults;
//! failed saves are logged and swallowed.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Settings file name in the working directory
pub const SETTINGS_FILE: &str = "leaf_crawler_settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Play the background track
    pub music_enabled: bool,
    /// Mute when the window loses focus
    pub mute_on_blur: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Gameplay ===
    /// Profile preselected on the menu (index into `BehaviorProfile::ALL`)
    pub default_profile: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            music_enabled: true,
            mute_on_blur: true,
            show_fps: false,
            default_profile: 0,
        }
    }
}

impl Settings {
    /// Load from the default location
    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    /// Save to the default location
    pub fn save(&self) {
        self.save_to(Path::new(SETTINGS_FILE));
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("unreadable settings ({err}), using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file, using defaults");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(path, json) {
                    log::warn!("failed to save settings: {err}");
                } else {
                    log::info!("settings saved");
                }
            }
            Err(err) => log::warn!("failed to encode settings: {err}"),
        }
    }
}
