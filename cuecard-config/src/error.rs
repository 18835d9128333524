//! Error types for the Cuecard configuration system

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to write configuration file
    #[error("Failed to write configuration file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration parsing failed
    #[error("Failed to parse configuration: {source}")]
    ParseError { source: Box<figment::Error> },

    /// Configuration could not be serialized for saving
    #[error("Failed to serialize configuration: {message}")]
    SerializeError { message: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {message}")]
    ValidationError { message: String },

    /// Home directory could not be determined
    #[error("Unable to determine home directory")]
    HomeDirectoryNotFound,
}

impl ConfigError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            message: message.into(),
        }
    }

    /// Create a serialization error from any displayable error
    pub fn serialize(error: impl std::fmt::Display) -> Self {
        ConfigError::SerializeError {
            message: error.to_string(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::ParseError {
            source: Box::new(error),
        }
    }
}
