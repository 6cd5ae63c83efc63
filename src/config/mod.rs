//! Configuration management for membertable.
//!
//! Settings come from an optional TOML file in the platform config directory.
//! A missing file is not an error; every key has a default.

mod settings;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

pub use settings::{Settings, DEFAULT_TICK_RATE_MS};

/// File name of the configuration file.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The config file exists but could not be read.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The config file is not valid TOML for our settings.
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A setting has an invalid value.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Application settings.
    pub settings: Settings,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file.
    ///
    /// Returns the default configuration if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&contents)?;
        settings.validate()?;

        debug!(path = %path.display(), "Loaded config file");
        Ok(Self { settings })
    }

    /// Override the source URL, validating the result.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Result<Self> {
        self.settings.source_url = url.into();
        self.settings.validate()?;
        Ok(self)
    }

    /// Path of the default configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("membertable").join(CONFIG_FILE_NAME))
    }
}
