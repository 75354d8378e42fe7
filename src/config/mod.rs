// SPDX-License-Identifier: MPL-2.0
//! This module handles the notifier configuration, including loading and saving
//! it from a `notifier.toml` file.
//!
//! # Configuration Sections
//!
//! - `[notifications]` - Default duration, concurrency bound and overlay position
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass a directory to `load_with_override()`/`save_with_override()`
//! 3. Set `TERRA_MIDI_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use midi_notifier::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load_with_override(None);
//!
//! // Modify a setting
//! config.notifications.max_concurrent = 5;
//!
//! // Save the modified configuration
//! config::save_with_override(&config, None).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "notifier.toml";
const APP_NAME: &str = "TerraMidi";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "TERRA_MIDI_CONFIG_DIR";

/// Catalog key shown when an existing config file could not be read.
pub const CONFIG_LOAD_ERROR_KEY: &str = "config-load-error";

/// Screen corner where the toast stack is anchored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

/// Notification lifecycle settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationConfig {
    /// Auto-dismiss duration used when an event does not specify its own.
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u64,

    /// Maximum number of notifications visible at once.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Corner of the window the toasts stack in.
    #[serde(default)]
    pub position: Position,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: DEFAULT_DURATION_MS,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            position: Position::default(),
        }
    }
}

impl NotificationConfig {
    /// Default duration clamped to the supported range.
    #[must_use]
    pub fn effective_default_duration_ms(&self) -> u64 {
        self.default_duration_ms
            .clamp(MIN_DURATION_MS, MAX_DURATION_MS)
    }

    /// Concurrency bound clamped to the supported range.
    #[must_use]
    pub fn effective_max_concurrent(&self) -> usize {
        self.max_concurrent
            .clamp(MIN_MAX_CONCURRENT, MAX_MAX_CONCURRENT)
    }
}

fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}

fn default_max_concurrent() -> usize {
    DEFAULT_MAX_CONCURRENT
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Resolves the config directory: explicit override, then environment, then
/// the platform default.
fn get_config_dir_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(dir) = base_dir {
        return Some(dir);
    }
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    get_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration, from `base_dir` when given.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// the default config with a catalog key describing what went wrong.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "falling back to default notifier config"
                    );
                    return (Config::default(), Some(CONFIG_LOAD_ERROR_KEY.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration, into `base_dir` when given.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            notifications: NotificationConfig {
                default_duration_ms: 4000,
                max_concurrent: 5,
                position: Position::BottomLeft,
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join(CONFIG_FILE);

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_falls_back_with_warning_on_invalid_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[notifications\n")
            .expect("failed to write broken config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some(CONFIG_LOAD_ERROR_KEY));
    }

    #[test]
    fn load_with_override_without_file_returns_defaults_silently() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = toml::from_str("[notifications]\nposition = \"bottom-right\"\n")
            .expect("partial config parses");
        assert_eq!(config.notifications.default_duration_ms, DEFAULT_DURATION_MS);
        assert_eq!(config.notifications.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.notifications.position, Position::BottomRight);
    }

    #[test]
    fn effective_values_are_clamped() {
        let config = NotificationConfig {
            default_duration_ms: 10,
            max_concurrent: 0,
            position: Position::TopRight,
        };
        assert_eq!(config.effective_default_duration_ms(), MIN_DURATION_MS);
        assert_eq!(config.effective_max_concurrent(), MIN_MAX_CONCURRENT);

        let config = NotificationConfig {
            default_duration_ms: u64::MAX,
            max_concurrent: 1000,
            position: Position::TopRight,
        };
        assert_eq!(config.effective_default_duration_ms(), MAX_DURATION_MS);
        assert_eq!(config.effective_max_concurrent(), MAX_MAX_CONCURRENT);
    }

    #[test]
    fn save_with_override_writes_into_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        save_with_override(&Config::default(), Some(temp_dir.path().to_path_buf()))
            .expect("save should succeed");
        assert!(temp_dir.path().join(CONFIG_FILE).exists());
    }
}
