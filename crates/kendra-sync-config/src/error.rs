//! Error types for configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("required configuration key '{key}' is not set")]
    MissingKey { key: String },

    /// A required environment variable is set but blank
    #[error("configuration key '{key}' must not be empty")]
    EmptyValue { key: String },

    /// A value could not be parsed into the expected shape
    #[error("invalid value '{value}' for '{key}' (expected {expected})")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },

    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A loaded configuration violates a validation rule
    #[error("{0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn missing(key: &str) -> Self {
        Self::MissingKey {
            key: key.to_string(),
        }
    }

    pub fn empty(key: &str) -> Self {
        Self::EmptyValue {
            key: key.to_string(),
        }
    }

    pub fn invalid_value(key: &str, value: &str, expected: &str) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Name of the configuration key this error refers to, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MissingKey { key } | Self::EmptyValue { key } | Self::InvalidValue { key, .. } => {
                Some(key)
            }
            _ => None,
        }
    }
}

/// Result type alias for ConfigError
pub type Result<T> = std::result::Result<T, ConfigError>;
