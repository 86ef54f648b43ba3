//! Settings management

use serde::{Deserialize, Serialize};
use slither_core::GameConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// File looked up in the working directory at startup.
pub const SETTINGS_FILE: &str = "slither.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub game: GameConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Snake".to_string(),
            width: 600,
            height: 600,
        }
    }
}

impl Settings {
    pub fn from_json(path: &Path, json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &json)
    }

    /// Load `path` if it exists, defaults otherwise. A file that exists but
    /// does not parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            info!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let settings = Self::load(path)?;
        info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let json = r#"{ "game": { "max_candies": 9 }, "window": { "title": "Test" } }"#;
        let settings = Settings::from_json(Path::new("inline.json"), json).unwrap();

        assert_eq!(settings.game.max_candies, 9);
        assert_eq!(settings.game.movement_speed, 90.0);
        assert_eq!(settings.window.title, "Test");
        assert_eq!(settings.window.width, 600);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = Settings::from_json(Path::new("bad.json"), "{ nope").unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let settings =
            Settings::load_or_default(Path::new("definitely/not/here/slither.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn round_trips_through_json() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(Path::new("mem"), &json).unwrap(), settings);
    }
}
