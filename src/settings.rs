//! Player preferences
//!
//! Persisted in LocalStorage in the browser; natively read from the JSON
//! file named by `BURNING_TENNIS_SETTINGS`. Table physics are fixed and not
//! part of the settings.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Hold the burning-time banner steady instead of pulsing it
    pub reduced_motion: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,
            reduced_motion: false,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// Banner opacity to draw, given the simulated pulse (0-255)
    pub fn burning_alpha(&self, pulse: u8) -> u8 {
        if self.reduced_motion { u8::MAX } else { pulse }
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "burning_tennis_settings";

    /// Environment variable naming the native settings file
    #[cfg(not(target_arch = "wasm32"))]
    pub const PATH_ENV: &'static str = "BURNING_TENNIS_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by [`Self::PATH_ENV`], falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::PATH_ENV) else {
            return Self::default();
        };
        let path = std::path::PathBuf::from(path);
        match Self::load_from_path(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
        settings.sfx_volume = 0.5;
        assert!((settings.effective_volume() - 0.4).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_reduced_motion_holds_banner() {
        let mut settings = Settings::default();
        assert_eq!(settings.burning_alpha(40), 40);
        settings.reduced_motion = true;
        assert_eq!(settings.burning_alpha(40), 255);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "muted": true, "show_fps": true }"#)
            .expect("valid settings");
        assert!(settings.muted);
        assert!(settings.show_fps);
        assert_eq!(settings.master_volume, 0.8);
        assert!(settings.mute_on_blur);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::path::Path::new("/definitely/not/here/settings.json");
        assert!(matches!(
            Settings::load_from_path(path),
            Err(SettingsError::Io(_))
        ));
    }
}
