// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use playmark::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.hide_delay_ticks = Some(5);
//! config::save(&config).expect("Failed to save config");
//! ```

mod defaults;

pub use defaults::*;

use crate::domain::video::HideDelay;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Playmark";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub hide_delay_ticks: Option<u32>,
    #[serde(default)]
    pub idle_tick_interval_ms: Option<u64>,
    #[serde(default)]
    pub progress_interval_ms: Option<u64>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hide_delay_ticks: Some(DEFAULT_HIDE_DELAY_TICKS),
            idle_tick_interval_ms: Some(DEFAULT_IDLE_TICK_INTERVAL_MS),
            progress_interval_ms: Some(DEFAULT_PROGRESS_INTERVAL_MS),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

impl Config {
    /// Idle ticks before the controls hide, clamped to the valid range.
    #[must_use]
    pub fn hide_delay(&self) -> HideDelay {
        self.hide_delay_ticks.map(HideDelay::new).unwrap_or_default()
    }

    /// Interval between idle ticks.
    #[must_use]
    pub fn idle_tick_interval(&self) -> Duration {
        clock_interval(self.idle_tick_interval_ms, DEFAULT_IDLE_TICK_INTERVAL_MS)
    }

    /// Interval between progress reports of the simulated player.
    #[must_use]
    pub fn progress_interval(&self) -> Duration {
        clock_interval(self.progress_interval_ms, DEFAULT_PROGRESS_INTERVAL_MS)
    }

    /// Log filter passed to `env_logger` when `RUST_LOG` is unset.
    #[must_use]
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

fn clock_interval(value: Option<u64>, default: u64) -> Duration {
    Duration::from_millis(value.unwrap_or(default).max(MIN_CLOCK_INTERVAL_MS))
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

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("Ignoring invalid config at {}: {}", path.display(), err);
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
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            hide_delay_ticks: Some(5),
            idle_tick_interval_ms: Some(250),
            progress_interval_ms: Some(100),
            log_level: Some("debug".to_string()),
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
    fn load_from_path_errors_on_missing_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "hide_delay_ticks = 7\n").expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.hide_delay().value(), 7);
        assert_eq!(loaded.idle_tick_interval(), Duration::from_secs(1));
        assert_eq!(loaded.log_level(), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn hide_delay_is_clamped() {
        let config = Config {
            hide_delay_ticks: Some(0),
            ..Config::default()
        };
        assert_eq!(config.hide_delay().value(), MIN_HIDE_DELAY_TICKS);
    }

    #[test]
    fn clock_intervals_have_a_floor() {
        let config = Config {
            idle_tick_interval_ms: Some(0),
            progress_interval_ms: Some(1),
            ..Config::default()
        };
        assert_eq!(
            config.idle_tick_interval(),
            Duration::from_millis(MIN_CLOCK_INTERVAL_MS)
        );
        assert_eq!(
            config.progress_interval(),
            Duration::from_millis(MIN_CLOCK_INTERVAL_MS)
        );
    }

    #[test]
    fn default_config_uses_three_tick_delay() {
        let config = Config::default();
        assert_eq!(config.hide_delay().value(), 3);
        assert_eq!(config.progress_interval(), Duration::from_millis(500));
    }
}
