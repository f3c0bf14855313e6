//! Endpoint-level settings.
//!
//! Mirrors the endpoint knobs that sit above individual services — today
//! that is the set of request identity public keys the endpoint accepts.
//! Keys are opaque strings issued by the runtime; they are validated for
//! shape and forwarded, never interpreted.

use crate::error::{ConfigError, Result};
use perdura_core::EndpointBuilder;
use serde::{Deserialize, Serialize};

/// Maximum number of identity keys per endpoint.
pub const MAX_IDENTITY_KEYS: usize = 16;
/// Maximum length of one identity key, in bytes.
pub const MAX_IDENTITY_KEY_LENGTH: usize = 512;
/// Environment variable holding a comma-separated identity key list.
pub const IDENTITY_KEYS_ENV_VAR: &str = "PERDURA_IDENTITY_KEYS";

/// Endpoint settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Request identity public keys the endpoint accepts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identity_keys: Vec<String>,
}

impl Settings {
    /// Creates empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one identity key.
    pub fn with_identity_key(mut self, key: impl Into<String>) -> Self {
        self.identity_keys.push(key.into());
        self
    }

    /// Builds settings from the `PERDURA_IDENTITY_KEYS` environment
    /// variable (comma-separated). Absence of the variable yields empty
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the variable is set but holds
    /// malformed keys.
    pub fn from_env() -> Result<Self> {
        match std::env::var(IDENTITY_KEYS_ENV_VAR) {
            Ok(raw) => {
                let settings = Self {
                    identity_keys: parse_identity_keys(&raw),
                };
                settings.validate()?;
                Ok(settings)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for too many keys, empty keys,
    /// oversized keys, or keys containing whitespace.
    pub fn validate(&self) -> Result<()> {
        if self.identity_keys.len() > MAX_IDENTITY_KEYS {
            return Err(ConfigError::invalid_field(
                "settings.identity_keys",
                format!("must have at most {MAX_IDENTITY_KEYS} entries"),
            ));
        }
        for key in &self.identity_keys {
            if key.is_empty() {
                return Err(ConfigError::invalid_field(
                    "settings.identity_keys",
                    "keys must not be empty",
                ));
            }
            if key.len() > MAX_IDENTITY_KEY_LENGTH {
                return Err(ConfigError::invalid_field(
                    "settings.identity_keys",
                    format!("keys must be at most {MAX_IDENTITY_KEY_LENGTH} bytes"),
                ));
            }
            if key.chars().any(char::is_whitespace) {
                return Err(ConfigError::invalid_field(
                    "settings.identity_keys",
                    "keys must not contain whitespace",
                ));
            }
        }
        Ok(())
    }

    /// Applies these settings to an endpoint builder.
    pub fn apply(&self, builder: EndpointBuilder) -> EndpointBuilder {
        builder.identity_keys(self.identity_keys.iter().cloned())
    }
}

/// Splits a comma-separated key list, trimming entries and dropping empty
/// segments.
pub fn parse_identity_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect()
}
