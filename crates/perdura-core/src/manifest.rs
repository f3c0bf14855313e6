//! Discovery manifest types.
//!
//! The manifest is the serializable description of an endpoint that the
//! runtime's deployment and admin surfaces consume: which services exist,
//! which handlers they expose, and the invocation configuration declared
//! for each. Durations are reported as integer milliseconds. Producing
//! the manifest is in scope; transporting it is the runtime's concern.

use crate::service::{Handler, InvocationConfig, Service};
use crate::time_ms::saturating_ms;
use crate::types::{HandlerName, RetryPolicy, ServiceName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Invocation configuration as reported in a manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigManifest {
    /// Free-form metadata entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
    /// Inactivity timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inactivity_timeout_ms: Option<u64>,
    /// Abort timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abort_timeout_ms: Option<u64>,
    /// Journal retention in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_retention_ms: Option<u64>,
    /// Idempotency retention in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_retention_ms: Option<u64>,
    /// Whether public ingress access is disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_private: Option<bool>,
    /// Declared retry policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<RetryPolicy>,
}

impl From<&InvocationConfig> for ConfigManifest {
    fn from(config: &InvocationConfig) -> Self {
        Self {
            metadata: config.metadata.clone(),
            inactivity_timeout_ms: config.inactivity_timeout.map(saturating_ms),
            abort_timeout_ms: config.abort_timeout.map(saturating_ms),
            journal_retention_ms: config.journal_retention.map(saturating_ms),
            idempotency_retention_ms: config.idempotency_retention.map(saturating_ms),
            ingress_private: config.ingress_private,
            retry_policy: config.retry_policy.clone(),
        }
    }
}

/// One handler as reported in a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerManifest {
    /// Handler name.
    pub name: HandlerName,
    /// Media type the handler accepts.
    pub accept: String,
    /// Media type the handler produces.
    pub content_type: String,
    /// Handler-level invocation configuration, unmerged.
    #[serde(default, skip_serializing_if = "config_is_empty")]
    pub config: ConfigManifest,
}

impl From<&Handler> for HandlerManifest {
    fn from(handler: &Handler) -> Self {
        Self {
            name: handler.name().clone(),
            accept: handler.accept().to_string(),
            content_type: handler.content_type().to_string(),
            config: handler.config().into(),
        }
    }
}

/// One service as reported in a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceManifest {
    /// Service name.
    pub name: ServiceName,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Service-level invocation configuration, unmerged.
    #[serde(default, skip_serializing_if = "config_is_empty")]
    pub config: ConfigManifest,
    /// Handlers in name order.
    pub handlers: Vec<HandlerManifest>,
}

impl From<&Service> for ServiceManifest {
    fn from(service: &Service) -> Self {
        Self {
            name: service.name().clone(),
            description: service.description().map(ToString::to_string),
            config: service.config().into(),
            handlers: service.handlers().map(HandlerManifest::from).collect(),
        }
    }
}

impl Service {
    /// Builds the manifest view of this service.
    pub fn manifest(&self) -> ServiceManifest {
        self.into()
    }
}

/// The manifest for a whole endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointManifest {
    /// Services bound to the endpoint, in name order.
    pub services: Vec<ServiceManifest>,
    /// Request identity public keys the endpoint accepts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identity_keys: Vec<String>,
}

fn config_is_empty(config: &ConfigManifest) -> bool {
    *config == ConfigManifest::default()
}
