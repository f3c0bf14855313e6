//! Option schemas mirroring the runtime's service and handler
//! configuration surface.
//!
//! [`InvocationOptions`] carries the fields shared by services and
//! handlers; [`ServiceOptions`] and [`HandlerOptions`] add the per-level
//! extras and the conversions into `perdura-core` registration objects.
//! Validation enforces well-formedness only — the runtime owns the
//! semantics of every knob.

use crate::error::{ConfigError, Result};
use perdura_core::codec::{HandlerBinding, PayloadCodec};
use perdura_core::{HandlerName, InvocationConfig, RetryPolicy, Service, ServiceName};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

/// Maximum number of metadata entries per service or handler.
pub const MAX_METADATA_ENTRIES: usize = 64;
/// Maximum length of a metadata key, in bytes.
pub const MAX_METADATA_KEY_LENGTH: usize = 128;
/// Maximum length of a metadata value, in bytes.
pub const MAX_METADATA_VALUE_LENGTH: usize = 1024;
/// Sanity cap for inactivity and abort timeouts: 7 days.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(7 * 24 * 60 * 60);
/// Sanity cap for journal and idempotency retention: 365 days.
pub const MAX_RETENTION: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Invocation options shared by services and handlers.
///
/// Every field is optional; an unset field defers to the runtime default
/// (or, for handlers, to the service-level value — the runtime decides).
/// Duration fields are written as integer milliseconds in config files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationOptions {
    /// Guards against stalled invocations: once it expires, the runtime
    /// asks the invocation to suspend, preserving intermediate progress.
    /// Overrides the runtime-wide default.
    #[serde(
        rename = "inactivity_timeout_ms",
        default,
        with = "perdura_core::time_ms::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub inactivity_timeout: Option<Duration>,

    /// Started once the inactivity timeout has expired and the invocation
    /// has been asked to suspend; when it expires the invocation is
    /// aborted, interrupting user code. Overrides the runtime-wide
    /// default.
    #[serde(
        rename = "abort_timeout_ms",
        default,
        with = "perdura_core::time_ms::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub abort_timeout: Option<Duration>,

    /// How long the runtime keeps the invocation journal. When a request
    /// carries an idempotency key, the idempotency retention caps this.
    #[serde(
        rename = "journal_retention_ms",
        default,
        with = "perdura_core::time_ms::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub journal_retention: Option<Duration>,

    /// Retention period for the results of idempotent requests.
    #[serde(
        rename = "idempotency_retention_ms",
        default,
        with = "perdura_core::time_ms::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub idempotency_retention: Option<Duration>,

    /// When `true`, not invocable from the runtime's public ingress, only
    /// from other services.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_private: Option<bool>,

    /// Metadata, as propagated in the runtime's admin API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,

    /// Retry policy for failed invocations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<RetryPolicy>,
}

fn validate_bounded(
    field: &str,
    value: Option<Duration>,
    max: Duration,
    max_label: &str,
) -> Result<()> {
    if let Some(duration) = value {
        if duration.is_zero() {
            return Err(ConfigError::invalid_field(
                field,
                "must be greater than zero",
            ));
        }
        if duration > max {
            return Err(ConfigError::invalid_field(
                field,
                format!("must be at most {max_label}"),
            ));
        }
    }
    Ok(())
}

impl InvocationOptions {
    /// Creates empty options (everything deferred to the runtime).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a metadata entry.
    pub fn with_metadata_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the inactivity timeout.
    pub fn with_inactivity_timeout(mut self, timeout: Duration) -> Self {
        self.inactivity_timeout = Some(timeout);
        self
    }

    /// Sets the abort timeout.
    pub fn with_abort_timeout(mut self, timeout: Duration) -> Self {
        self.abort_timeout = Some(timeout);
        self
    }

    /// Sets the journal retention.
    pub fn with_journal_retention(mut self, retention: Duration) -> Self {
        self.journal_retention = Some(retention);
        self
    }

    /// Sets the idempotency retention.
    pub fn with_idempotency_retention(mut self, retention: Duration) -> Self {
        self.idempotency_retention = Some(retention);
        self
    }

    /// Sets whether public ingress access is disabled.
    pub fn with_ingress_private(mut self, private: bool) -> Self {
        self.ingress_private = Some(private);
        self
    }

    /// Sets the retry policy.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Validates the options for well-formedness.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for zero or oversized durations,
    /// oversized metadata, or an inconsistent retry policy.
    pub fn validate(&self) -> Result<()> {
        if let Some(metadata) = &self.metadata {
            if metadata.len() > MAX_METADATA_ENTRIES {
                return Err(ConfigError::invalid_field(
                    "metadata",
                    format!("must have at most {MAX_METADATA_ENTRIES} entries"),
                ));
            }
            for (key, value) in metadata {
                if key.is_empty() {
                    return Err(ConfigError::invalid_field(
                        "metadata",
                        "keys must not be empty",
                    ));
                }
                if key.len() > MAX_METADATA_KEY_LENGTH {
                    return Err(ConfigError::invalid_field(
                        "metadata",
                        format!("key {key:?} exceeds {MAX_METADATA_KEY_LENGTH} bytes"),
                    ));
                }
                if value.len() > MAX_METADATA_VALUE_LENGTH {
                    return Err(ConfigError::invalid_field(
                        "metadata",
                        format!("value for key {key:?} exceeds {MAX_METADATA_VALUE_LENGTH} bytes"),
                    ));
                }
            }
        }
        validate_bounded(
            "inactivity_timeout_ms",
            self.inactivity_timeout,
            MAX_TIMEOUT,
            "7 days",
        )?;
        validate_bounded("abort_timeout_ms", self.abort_timeout, MAX_TIMEOUT, "7 days")?;
        validate_bounded(
            "journal_retention_ms",
            self.journal_retention,
            MAX_RETENTION,
            "365 days",
        )?;
        validate_bounded(
            "idempotency_retention_ms",
            self.idempotency_retention,
            MAX_RETENTION,
            "365 days",
        )?;
        if let Some(policy) = &self.retry_policy {
            policy.validate()?;
        }
        Ok(())
    }

    /// Converts into the core invocation configuration, field for field.
    pub fn to_config(&self) -> InvocationConfig {
        InvocationConfig {
            metadata: self.metadata.clone(),
            inactivity_timeout: self.inactivity_timeout,
            abort_timeout: self.abort_timeout,
            journal_retention: self.journal_retention,
            idempotency_retention: self.idempotency_retention,
            ingress_private: self.ingress_private,
            retry_policy: self.retry_policy.clone(),
        }
    }
}

/// Options describing one durable service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOptions {
    /// Name of the service.
    pub name: String,

    /// Documentation as shown in the runtime's UI and admin API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Shared invocation options.
    #[serde(flatten)]
    pub invocation: InvocationOptions,
}

impl ServiceOptions {
    /// Creates options for a service with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            invocation: InvocationOptions::default(),
        }
    }

    /// Sets the service description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the shared invocation options.
    pub fn with_invocation(mut self, invocation: InvocationOptions) -> Self {
        self.invocation = invocation;
        self
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns an error when the name violates the service-name grammar or
    /// the invocation options are malformed.
    pub fn validate(&self) -> Result<()> {
        ServiceName::new(&self.name)?;
        self.invocation.validate()
    }

    /// Constructs a [`Service`] from these options.
    ///
    /// Every field is passed through unchanged; nothing is defaulted or
    /// merged here.
    ///
    /// # Errors
    ///
    /// Returns an error when validation fails.
    pub fn new_service(&self) -> Result<Service> {
        self.validate()?;
        let name = ServiceName::new(&self.name)?;
        let mut service = Service::new(name).with_config(self.invocation.to_config());
        if let Some(description) = &self.description {
            service = service.with_description(description);
        }
        tracing::debug!(service = %self.name, "service constructed from options");
        Ok(service)
    }
}

/// Options describing one service handler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandlerOptions {
    /// Name of the handler. When unset, the fallback name given at bind
    /// time is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Shared invocation options.
    #[serde(flatten)]
    pub invocation: InvocationOptions,
}

impl HandlerOptions {
    /// Creates empty handler options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates handler options with an explicit name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            invocation: InvocationOptions::default(),
        }
    }

    /// Sets the shared invocation options.
    pub fn with_invocation(mut self, invocation: InvocationOptions) -> Self {
        self.invocation = invocation;
        self
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns an error when the declared name violates the handler-name
    /// grammar or the invocation options are malformed.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            HandlerName::new(name)?;
        }
        self.invocation.validate()
    }

    /// Resolves the handler name: the declared name wins, otherwise the
    /// fallback.
    ///
    /// # Errors
    ///
    /// Returns an error when the resolved name violates the handler-name
    /// grammar.
    pub fn handler_name(&self, fallback: &str) -> Result<HandlerName> {
        Ok(HandlerName::new(self.name.as_deref().unwrap_or(fallback))?)
    }

    /// Registers `handler_fn` on `service` with these options and the
    /// default JSON binding.
    ///
    /// `fallback_name` plays the role of the function name in runtimes
    /// that can reflect on it; the declared `name` wins when set.
    ///
    /// # Errors
    ///
    /// Returns an error when validation fails or a handler with the same
    /// name is already registered.
    pub fn bind<I, O, F, Fut>(
        &self,
        service: &mut Service,
        fallback_name: &str,
        handler_fn: F,
    ) -> Result<()>
    where
        I: Serialize + DeserializeOwned + Send + 'static,
        O: Serialize + DeserializeOwned + Send + 'static,
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = perdura_core::Result<O>> + Send + 'static,
    {
        self.bind_with(service, fallback_name, HandlerBinding::json(), handler_fn)
    }

    /// Registers `handler_fn` on `service` with these options and an
    /// explicit binding (media types and codecs).
    ///
    /// # Errors
    ///
    /// Returns an error when validation fails or a handler with the same
    /// name is already registered.
    pub fn bind_with<I, O, F, Fut, InC, OutC>(
        &self,
        service: &mut Service,
        fallback_name: &str,
        binding: HandlerBinding<InC, OutC>,
        handler_fn: F,
    ) -> Result<()>
    where
        I: Send + 'static,
        O: Send + 'static,
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = perdura_core::Result<O>> + Send + 'static,
        InC: PayloadCodec<I> + 'static,
        OutC: PayloadCodec<O> + 'static,
    {
        self.validate()?;
        let name = self.handler_name(fallback_name)?;
        service.register(name, self.invocation.to_config(), binding, handler_fn)?;
        Ok(())
    }
}
