use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{Config, CONFIG_FILE_NAME};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the default config path inside `root`.
    pub fn config_path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE_NAME)
    }

    /// Loads `mqwriter.toml` from `root`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses and validates it.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = Self::config_path(root);

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path. A missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `to`, when set, is not blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(to) = &self.to {
            if to.as_os_str().to_string_lossy().trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "'to' must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}
