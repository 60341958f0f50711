//! Configuration module
//!
//! Handles loading and saving RulerPlus configuration, including the persisted
//! unit selection.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ruler::{SettingsPort, UnitKind};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Ruler state
    #[serde(default)]
    pub ruler: RulerConfig,
}

/// General configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
}

/// Persisted ruler state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulerConfig {
    /// Selected unit: 0 = inches, 1 = centimeters, 2 = pixels
    #[serde(default)]
    pub current_measurement: usize,
}

impl RulerConfig {
    pub fn unit(&self) -> UnitKind {
        UnitKind::from_index(self.current_measurement).unwrap_or_default()
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from `path`, treating a missing file as defaults
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Where the configuration lives when no path is given
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("rulerplus/config.toml"))
            .unwrap_or_else(|| PathBuf::from("./rulerplus.toml"))
    }
}

/// Settings port backed by the TOML configuration file.
///
/// Only `ruler.current_measurement` changes on save; the rest of the file is
/// written back as loaded.
#[derive(Debug, Clone)]
pub struct TomlSettings {
    path: PathBuf,
    config: Config,
    detached: bool,
}

impl TomlSettings {
    pub fn new(path: PathBuf, config: Config) -> Self {
        Self {
            path,
            config,
            detached: false,
        }
    }

    /// Settings that never write to `path`, used when the file there could
    /// not be read. Saves only change the in-memory value.
    pub fn detached(path: PathBuf, config: Config) -> Self {
        Self {
            path,
            config,
            detached: true,
        }
    }

    /// Open the settings at `path`; a missing file yields defaults
    pub fn open(path: PathBuf) -> ConfigResult<Self> {
        let config = Config::load_or_default(&path)?;
        Ok(Self::new(path, config))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

impl SettingsPort for TomlSettings {
    type Error = ConfigError;

    fn load(&self) -> usize {
        self.config.ruler.current_measurement
    }

    fn save(&mut self, unit_index: usize) -> ConfigResult<()> {
        self.config.ruler.current_measurement = unit_index;
        if self.detached {
            tracing::debug!(
                "Not saving unit index {}: {} is left as found",
                unit_index,
                self.path.display()
            );
            return Ok(());
        }
        self.config.save(&self.path)?;
        tracing::debug!("Saved unit index {} to {}", unit_index, self.path.display());
        Ok(())
    }
}

/// Generate a sample configuration file
pub fn generate_sample_config() -> ConfigResult<String> {
    let config = Config {
        general: GeneralConfig { verbose: false },
        ruler: RulerConfig {
            current_measurement: UnitKind::Centimeters.index(),
        },
    };

    Ok(toml::to_string_pretty(&config)?)
}
