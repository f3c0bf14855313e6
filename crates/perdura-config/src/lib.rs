#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Perdura Configuration Library
//!
//! Declarative, validated option schemas for durable service endpoints,
//! plus the conversions that construct registration objects from them.

pub mod error;
pub mod file;
pub mod options;
pub mod settings;

// Re-exports for convenience
pub use error::{ConfigError, Result};
pub use file::{
    ConfigFile, ServiceEntry, CONFIG_ENV_VAR, DEFAULT_CONFIG_NAME, MAX_CONFIG_FILE_SIZE,
};
pub use options::{HandlerOptions, InvocationOptions, ServiceOptions};
pub use settings::{Settings, IDENTITY_KEYS_ENV_VAR};

// The registration surface the conversions target.
pub use perdura_core as core;
