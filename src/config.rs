//! JSON configuration with a fixed key set
//!
//! Missing file yields defaults; a corrupt file yields defaults with a
//! warning rather than an error, so a bad config never blocks the session.

use crate::error::SdxError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Quality label applied when the user accepts the default
    pub default_quality: String,
    /// Render a progress bar while downloading
    pub show_progress: bool,
    /// Fire a desktop notification after successful downloads
    pub notifications: bool,
    /// Offer URLs found on the system clipboard
    pub clipboard_monitoring: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_quality: "best".to_string(),
            show_progress: true,
            notifications: true,
            clipboard_monitoring: false,
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when absent or unreadable
    pub fn load(path: &Path) -> Config {
        if !path.exists() {
            return Config::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Error reading config file ({}); using defaults", e);
                    Config::default()
                }
            },
            Err(e) => {
                warn!("Could not open config file ({}); using defaults", e);
                Config::default()
            }
        }
    }

    /// Persist as pretty-printed JSON, creating the parent directory
    pub fn save(&self, path: &Path) -> Result<(), SdxError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_quality, "best");
        assert!(config.show_progress);
        assert!(config.notifications);
        assert!(!config.clipboard_monitoring);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_corrupt_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Config::load(&path), Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let config = Config {
            default_quality: "720p".to_string(),
            show_progress: false,
            notifications: false,
            clipboard_monitoring: true,
        };
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"default_quality": "480p"}"#).unwrap();

        let config = Config::load(&path);
        assert_eq!(config.default_quality, "480p");
        assert!(config.show_progress);
        assert!(!config.clipboard_monitoring);
    }
}
