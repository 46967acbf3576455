//! Configuration module for lorepo.

use serde::Deserialize;
use std::path::Path;

use crate::{LorepoError, Result};

/// Repository storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryConfig {
    /// Root directory of the file repository.
    #[serde(default = "default_repository_root")]
    pub root: String,
    /// Public base URL under which stored files are served.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_repository_root() -> String {
    "data/repository".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080/repository".to_string()
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            root: default_repository_root(),
            base_url: default_base_url(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/lorepo.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/lorepo.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Repository storage settings.
    #[serde(default)]
    pub repository: RepositoryConfig,
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| LorepoError::Config(format!("failed to read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| LorepoError::Config(format!("failed to parse config: {e}")))
    }
}
