//! core::config
//!
//! Local CLI configuration: where the platform lives and how to
//! authenticate against it.
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$CCD_CONFIG` if set (path to the config file itself)
//! 2. `<user config dir>/ccd/config.toml`
//!
//! On first run the file is created with documented defaults
//! (`http://localhost:8001`, `root`). The file is read fully at
//! process start and rewritten fully on any single-key update; there
//! is no partial editing and no concurrent-writer protection, because
//! invocations do not overlap for a single user.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default platform URL for a fresh installation.
pub const DEFAULT_API_URL: &str = "http://localhost:8001";

/// Default API key for a fresh installation.
pub const DEFAULT_API_KEY: &str = "root";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("config directory not found")]
    NoConfigDir,
}

/// The local CLI configuration.
///
/// Key names on disk match what `ccd cli list` shows and what
/// `ccd cli set` accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(rename = "API_URL")]
    pub api_url: String,
    #[serde(rename = "API_KEY")]
    pub api_key: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
        }
    }
}

impl CliConfig {
    /// Resolve the config file path.
    pub fn path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var("CCD_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("ccd/config.toml"))
    }

    /// Load the configuration, creating it with defaults on first run.
    ///
    /// Returns the configuration together with the path it lives at, so
    /// later `set` calls rewrite the same file.
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let path = Self::path()?;
        let config = Self::load_from(&path)?;
        Ok((config, path))
    }

    /// Load from an explicit path, creating it with defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Rewrite the whole file at `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let rendered = toml::to_string_pretty(self).expect("config serializes");
        fs::write(path, rendered).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Look up a value by its on-disk key name.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "API_URL" => Some(&self.api_url),
            "API_KEY" => Some(&self.api_key),
            _ => None,
        }
    }

    /// Set a value by its on-disk key name.
    ///
    /// Unknown keys are rejected locally, before anything is written.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "API_URL" => self.api_url = value.to_string(),
            "API_KEY" => self.api_key = value.to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// All entries in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        vec![("API_URL", &self.api_url), ("API_KEY", &self.api_key)]
    }
}
