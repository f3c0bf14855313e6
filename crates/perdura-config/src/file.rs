//! Configuration file loading.
//!
//! Configuration is loaded from a TOML file with strict size limits and
//! fails closed: a missing, oversized, unparsable, or invalid file never
//! yields a usable configuration. Handlers declared in a file must be
//! named — the bind-time fallback name only exists for handlers declared
//! in code.

use crate::error::{ConfigError, Result};
use crate::options::{HandlerOptions, ServiceOptions};
use crate::settings::Settings;
use perdura_core::manifest::{EndpointManifest, HandlerManifest, ServiceManifest};
use perdura_core::codec::APPLICATION_JSON;
use perdura_core::{HandlerName, Service, ServiceName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "perdura.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "PERDURA_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;

/// One `[[service]]` entry: service options plus its declared handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Service options.
    #[serde(flatten)]
    pub options: ServiceOptions,

    /// Declared handlers (`[[service.handler]]`).
    #[serde(default, rename = "handler", skip_serializing_if = "Vec::is_empty")]
    pub handlers: Vec<HandlerOptions>,
}

impl ServiceEntry {
    /// Looks up declared handler options by name.
    pub fn handler(&self, name: &str) -> Option<&HandlerOptions> {
        self.handlers
            .iter()
            .find(|handler| handler.name.as_deref() == Some(name))
    }

    /// Validates the entry, including handler name uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for malformed options, unnamed
    /// declared handlers, or duplicate handler names.
    pub fn validate(&self) -> Result<()> {
        self.options.validate()?;
        let mut seen = BTreeSet::new();
        for (index, handler) in self.handlers.iter().enumerate() {
            handler.validate()?;
            let Some(name) = handler.name.as_deref() else {
                return Err(ConfigError::invalid_field(
                    format!("service.{}.handler[{index}].name", self.options.name),
                    "handlers declared in a config file must be named",
                ));
            };
            if !seen.insert(name.to_string()) {
                return Err(ConfigError::invalid_field(
                    format!("service.{}.handler", self.options.name),
                    format!("duplicate handler name {name:?}"),
                ));
            }
        }
        Ok(())
    }

    /// Builds the declared manifest view of this entry.
    ///
    /// Declared handlers have no bound functions yet, so media types
    /// report the bind-time defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when a name fails to parse.
    pub fn manifest(&self) -> Result<ServiceManifest> {
        let mut handlers = Vec::with_capacity(self.handlers.len());
        for (index, handler) in self.handlers.iter().enumerate() {
            let Some(name) = handler.name.as_deref() else {
                return Err(ConfigError::invalid_field(
                    format!("service.{}.handler[{index}].name", self.options.name),
                    "handlers declared in a config file must be named",
                ));
            };
            handlers.push(HandlerManifest {
                name: HandlerName::new(name)?,
                accept: APPLICATION_JSON.to_string(),
                content_type: APPLICATION_JSON.to_string(),
                config: (&handler.invocation.to_config()).into(),
            });
        }
        Ok(ServiceManifest {
            name: ServiceName::new(&self.options.name)?,
            description: self.options.description.clone(),
            config: (&self.options.invocation.to_config()).into(),
            handlers,
        })
    }
}

/// Root of a Perdura configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Endpoint-level settings.
    #[serde(default)]
    pub settings: Settings,

    /// Declared services (`[[service]]`).
    #[serde(default, rename = "service", skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ServiceEntry>,
}

impl ConfigFile {
    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from disk.
    ///
    /// Resolution order: the explicit `path`, then the `PERDURA_CONFIG`
    /// environment variable, then `./perdura.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, or validation fails,
    /// or when the file exceeds [`MAX_CONFIG_FILE_SIZE`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let resolved = resolve_path(path);
        let bytes =
            fs::read(&resolved).map_err(|e| ConfigError::io(resolved.clone(), e.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::invalid_field(
                "config file",
                format!("exceeds size limit of {MAX_CONFIG_FILE_SIZE} bytes"),
            ));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::invalid_field("config file", "must be UTF-8"))?;
        let config = Self::from_toml_str(content)?;
        tracing::debug!(
            path = %resolved.display(),
            services = config.services.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Validates the whole file, including service name uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when any entry is malformed or two
    /// services share a name.
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()?;
        let mut seen = BTreeSet::new();
        for entry in &self.services {
            entry.validate()?;
            if !seen.insert(entry.options.name.clone()) {
                return Err(ConfigError::invalid_field(
                    "service",
                    format!("duplicate service name {:?}", entry.options.name),
                ));
            }
        }
        Ok(())
    }

    /// Looks up a service entry by name.
    pub fn service(&self, name: &str) -> Option<&ServiceEntry> {
        self.services.iter().find(|entry| entry.options.name == name)
    }

    /// Constructs a [`Service`] for every entry.
    ///
    /// Handlers are *not* bound here — functions live in code, so callers
    /// pair each returned service with [`ServiceEntry::handler`] options
    /// and bind the functions themselves.
    ///
    /// # Errors
    ///
    /// Returns an error when any entry fails validation or conversion.
    pub fn build_services(&self) -> Result<Vec<Service>> {
        self.services
            .iter()
            .map(|entry| entry.options.new_service())
            .collect()
    }

    /// Builds the declared endpoint manifest: every service and handler in
    /// the file, plus the settings' identity keys.
    ///
    /// # Errors
    ///
    /// Returns an error when any entry fails to convert.
    pub fn manifest(&self) -> Result<EndpointManifest> {
        let services = self
            .services
            .iter()
            .map(ServiceEntry::manifest)
            .collect::<Result<Vec<_>>>()?;
        Ok(EndpointManifest {
            services,
            identity_keys: self.settings.identity_keys.clone(),
        })
    }
}

fn resolve_path(path: Option<&Path>) -> PathBuf {
    if let Some(path) = path {
        return path.to_path_buf();
    }
    if let Ok(from_env) = env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(from_env);
    }
    PathBuf::from(DEFAULT_CONFIG_NAME)
}
