//! Review session configuration
//!
//! Reviewer identity and fetch settings, loadable from
//! `~/.config/imsieve/config.toml`. Every field has a default so a partial
//! file (or none at all) is valid. The config object is threaded through
//! the navigator explicitly; there is no process-wide identity.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Review session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Identity recorded in review annotations
    #[serde(default = "default_reviewer")]
    pub reviewer_id: String,
    /// User-Agent header for site fetches
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            reviewer_id: default_reviewer(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ReviewConfig {
    /// Load from the user config file, falling back to defaults when no
    /// file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let path = match Self::config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(Self::default()),
        };
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("imsieve").join("config.toml"))
    }
}

fn default_reviewer() -> String {
    std::env::var("USER").unwrap_or_else(|_| "anonymous".to_string())
}

fn default_user_agent() -> String {
    "imsieve/0.1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
