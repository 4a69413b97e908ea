//! Configuration file handling
//!
//! The config lives at `<config dir>/tuivid/config.toml`. A missing file
//! means defaults; missing keys inside a file fall back to their defaults
//! too, so older files keep working as options are added.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::graphics::ImageType;
use crate::player::{PlayerOptions, TimeDisplayMode, UpdateStrategy};

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub log: LogConfig,
}

/// Playback defaults, overridable per run from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub image_type: ImageType,
    pub update_strategy: UpdateStrategy,
    pub speed: f64,
    pub fps_decrease_factor: u32,
    pub time_display: TimeDisplayMode,
    pub show_controls: bool,
    pub exit_on_finish: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            image_type: ImageType::default(),
            update_strategy: UpdateStrategy::default(),
            speed: 1.0,
            fps_decrease_factor: 1,
            time_display: TimeDisplayMode::default(),
            show_controls: true,
            exit_on_finish: false,
        }
    }
}

impl PlayerConfig {
    /// Player options for `path` with these settings.
    pub fn to_options(&self, path: &Path) -> PlayerOptions {
        PlayerOptions::new(path)
            .with_image_type(self.image_type)
            .with_speed(self.speed)
            .with_update_strategy(self.update_strategy)
            .with_fps_decrease_factor(self.fps_decrease_factor)
    }
}

/// Log file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter when `TUIVID_LOG` is unset (e.g. "info", "tuivid=debug")
    pub level: String,
    /// Log file, relative paths are resolved against the config directory
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: PathBuf::from("tuivid.log"),
        }
    }
}

impl Config {
    /// Load the config from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the config from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Save the config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Directory holding the config and the default log file.
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(base.join("tuivid"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Absolute path of the log file.
    pub fn log_path(&self) -> Result<PathBuf> {
        if self.log.file.is_absolute() {
            Ok(self.log.file.clone())
        } else {
            Ok(Self::config_dir()?.join(&self.log.file))
        }
    }
}
