// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! notification preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use cart_snackbar::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Keep four notifications on screen instead of three
//! config.notifications.capacity = Some(4);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::{BufferCapacity, ExpiryDelay, PulseWindow, QueueCapacity};
use crate::error::Result;
use crate::notifications::ChannelSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "CartSnackbar";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// `[notifications]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default)]
    pub capacity: Option<usize>,
    #[serde(default)]
    pub expiry_ms: Option<u64>,
    #[serde(default)]
    pub pulse_ms: Option<u64>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            capacity: Some(DEFAULT_CAPACITY),
            expiry_ms: Some(DEFAULT_EXPIRY_MS),
            pulse_ms: Some(DEFAULT_PULSE_MS),
        }
    }
}

/// `[diagnostics]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    #[serde(default)]
    pub buffer_capacity: Option<usize>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
        }
    }
}

impl Config {
    /// Resolves the notification section into clamped channel settings.
    #[must_use]
    pub fn channel_settings(&self) -> ChannelSettings {
        let section = &self.notifications;
        ChannelSettings {
            capacity: QueueCapacity::new(section.capacity.unwrap_or(DEFAULT_CAPACITY)),
            expiry: ExpiryDelay::from_millis(section.expiry_ms.unwrap_or(DEFAULT_EXPIRY_MS)),
            pulse: PulseWindow::from_millis(section.pulse_ms.unwrap_or(DEFAULT_PULSE_MS)),
        }
    }

    /// Resolves the diagnostics buffer size.
    #[must_use]
    pub fn diagnostics_capacity(&self) -> BufferCapacity {
        BufferCapacity::new(
            self.diagnostics
                .buffer_capacity
                .unwrap_or(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
        )
    }
}

impl From<&Config> for ChannelSettings {
    fn from(config: &Config) -> Self {
        config.channel_settings()
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads a configuration file, falling back to defaults when it is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("Ignoring malformed config at {path:?}: {err}");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        buffer_capacity_bounds, expiry_bounds, pulse_bounds, queue_capacity_bounds,
    };
    use std::time::Duration;
    use tempfile::tempdir;

    // Verify domain bounds match config constants
    #[test]
    fn domain_bounds_match_config() {
        assert_eq!(queue_capacity_bounds::MIN, MIN_CAPACITY);
        assert_eq!(queue_capacity_bounds::MAX, MAX_CAPACITY);
        assert_eq!(queue_capacity_bounds::DEFAULT, DEFAULT_CAPACITY);
        assert_eq!(expiry_bounds::MIN, MIN_EXPIRY_MS);
        assert_eq!(expiry_bounds::MAX, MAX_EXPIRY_MS);
        assert_eq!(expiry_bounds::DEFAULT, DEFAULT_EXPIRY_MS);
        assert_eq!(pulse_bounds::MIN, MIN_PULSE_MS);
        assert_eq!(pulse_bounds::MAX, MAX_PULSE_MS);
        assert_eq!(pulse_bounds::DEFAULT, DEFAULT_PULSE_MS);
        assert_eq!(buffer_capacity_bounds::MIN, MIN_DIAGNOSTICS_BUFFER_CAPACITY);
        assert_eq!(buffer_capacity_bounds::MAX, MAX_DIAGNOSTICS_BUFFER_CAPACITY);
        assert_eq!(
            buffer_capacity_bounds::DEFAULT,
            DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY
        );
    }

    #[test]
    fn save_and_load_round_trip_preserves_notification_section() {
        let config = Config {
            notifications: NotificationConfig {
                capacity: Some(5),
                expiry_ms: Some(4000),
                pulse_ms: Some(300),
            },
            diagnostics: DiagnosticsConfig::default(),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn load_from_missing_path_is_an_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn partial_sections_fill_missing_keys_with_none() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[notifications]\ncapacity = 2\n").expect("write");

        let loaded = load_from_path(&config_path).expect("load");
        assert_eq!(loaded.notifications.capacity, Some(2));
        assert_eq!(loaded.notifications.expiry_ms, None);

        let settings = loaded.channel_settings();
        assert_eq!(settings.capacity.value(), 2);
        assert_eq!(settings.expiry.millis(), DEFAULT_EXPIRY_MS);
    }

    #[test]
    fn channel_settings_clamp_out_of_range_values() {
        let config = Config {
            notifications: NotificationConfig {
                capacity: Some(0),
                expiry_ms: Some(1),
                pulse_ms: Some(1_000_000),
            },
            diagnostics: DiagnosticsConfig {
                buffer_capacity: Some(1),
            },
        };

        let settings = config.channel_settings();
        assert_eq!(settings.capacity.value(), MIN_CAPACITY);
        assert_eq!(settings.expiry.millis(), MIN_EXPIRY_MS);
        assert_eq!(settings.pulse.as_duration(), Duration::from_millis(MAX_PULSE_MS));
        assert_eq!(
            config.diagnostics_capacity().value(),
            MIN_DIAGNOSTICS_BUFFER_CAPACITY
        );
    }

    #[test]
    fn default_config_matches_default_settings() {
        assert_eq!(Config::default().channel_settings(), ChannelSettings::default());
    }

    #[test]
    fn channel_settings_convert_from_config() {
        let config = Config {
            notifications: NotificationConfig {
                capacity: Some(5),
                expiry_ms: Some(1500),
                pulse_ms: None,
            },
            ..Config::default()
        };

        let settings = ChannelSettings::from(&config);
        assert_eq!(settings.capacity.value(), 5);
        assert_eq!(settings.expiry.millis(), 1500);
        assert_eq!(settings.pulse.as_duration(), Duration::from_millis(DEFAULT_PULSE_MS));
    }
}
