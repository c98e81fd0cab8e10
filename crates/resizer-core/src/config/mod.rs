//! Configuration management for Resizer.
//!
//! Configuration is loaded from the platform config directory with defaults
//! that reproduce the production rendition table. The loaded `Config` is built
//! once at startup and handed to the orchestrator by reference.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Resizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendition plans per category
    pub catalog: CatalogConfig,

    /// Watermark overlays
    pub watermark: WatermarkConfig,

    /// Unknown-category policy
    pub routing: RoutingConfig,

    /// Local storage backend
    pub storage: StorageConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.resizer.resizer/config.toml
    /// - Linux: ~/.config/resizer/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\resizer\config\config.toml
    ///
    /// Falls back to ~/.resizer/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "resizer", "resizer")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".resizer").join("config.toml")
            })
    }

    /// Get the resolved local storage root (with ~ expansion).
    pub fn storage_root(&self) -> PathBuf {
        let path_str = self.storage.root.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResizeMode;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog.article.len(), 3);
        assert_eq!(config.catalog.profile[0].mode, ResizeMode::Crop);
        assert_eq!(config.catalog.message[0].target_size, 1280);
        assert!(!config.watermark.enabled);
        assert!(!config.routing.reject_unknown);
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("catalog.article"));
        assert!(toml.contains("[watermark]"));
        assert!(toml.contains("[logging]"));
    }

    #[test]
    fn test_toml_round_trip_keeps_catalog() {
        let toml = Config::default().to_toml().unwrap();
        let parsed = Config::from_toml(&toml).unwrap();
        assert_eq!(parsed.catalog.article, Config::default().catalog.article);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config = Config::from_toml("[routing]\nreject_unknown = true\n").unwrap();
        assert!(config.routing.reject_unknown);
        assert_eq!(config.catalog.article.len(), 3);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[[catalog.message]]\nlabel = \"xl\"\nmode = \"ratio\"\nquality = 80\ntarget_size = 2048\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.catalog.message.len(), 1);
        assert_eq!(config.catalog.message[0].label, "xl");
    }
}
