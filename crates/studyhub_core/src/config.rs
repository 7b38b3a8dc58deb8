//! Core configuration.
//!
//! # Responsibility
//! - Describe logging and alert settings in one TOML document.
//! - Fill every missing field with a default so an empty file is valid.
//!
//! # Invariants
//! - A loaded `CoreConfig` has already passed `validate()`.

use crate::logging::default_log_level;
use crate::notify::policy::{AlertPolicy, AlertPolicyError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_MAX_LOG_FILES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute directory for rolling log files; stderr when absent.
    pub dir: Option<PathBuf>,
    pub max_file_size_bytes: u64,
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
            max_file_size_bytes: DEFAULT_MAX_LOG_FILE_SIZE_BYTES,
            max_files: DEFAULT_MAX_LOG_FILES,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub logging: LoggingConfig,
    pub alerts: AlertPolicy,
}

impl CoreConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.max_files == 0 {
            return Err(ConfigError::Invalid(
                "logging.max_files must be at least 1".to_string(),
            ));
        }
        if self.logging.max_file_size_bytes == 0 {
            return Err(ConfigError::Invalid(
                "logging.max_file_size_bytes must be positive".to_string(),
            ));
        }
        self.alerts.validate()?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    Invalid(String),
    Alerts(AlertPolicyError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config TOML: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
            Self::Alerts(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Alerts(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<AlertPolicyError> for ConfigError {
    fn from(value: AlertPolicyError) -> Self {
        Self::Alerts(value)
    }
}
