//! Error types for configuration loading and validation.

use std::path::PathBuf;

/// Errors that can occur while loading, parsing, or validating
/// configuration.
///
/// Loading fails closed: any I/O, parse, or validation problem prevents
/// the configuration from being used.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error reading {path}: {message}")]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error message
        message: String,
    },

    /// The configuration file is not valid TOML for the expected schema.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A configuration value failed validation.
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// Field or aspect that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// An error raised by the registration surface during conversion.
    #[error(transparent)]
    Core(#[from] perdura_core::Error),
}

/// Convenience `Result` type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    /// Creates a new validation error.
    pub fn invalid<S: Into<String>>(message: S) -> Self {
        ConfigError::Invalid {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn invalid_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        ConfigError::Invalid {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns whether this error came from validation (here or in the
    /// registration surface).
    pub fn is_validation(&self) -> bool {
        match self {
            ConfigError::Invalid { .. } => true,
            ConfigError::Core(err) => err.is_validation(),
            _ => false,
        }
    }
}
