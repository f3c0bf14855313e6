//! Endpoint aggregation.
//!
//! An [`Endpoint`] bundles the services a deployment exposes together with
//! the request identity keys it accepts. The runtime discovers the bundle
//! through [`Endpoint::manifest`]; actually serving requests is the
//! runtime's job.

use crate::error::{Error, Result};
use crate::manifest::EndpointManifest;
use crate::service::Service;
use crate::types::ServiceName;
use std::collections::BTreeMap;

/// A deployable bundle of services.
#[derive(Debug, Clone)]
pub struct Endpoint {
    services: BTreeMap<ServiceName, Service>,
    identity_keys: Vec<String>,
}

impl Endpoint {
    /// Starts building an endpoint.
    pub fn builder() -> EndpointBuilder {
        EndpointBuilder::default()
    }

    /// Iterates over bound services in name order.
    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.services.values()
    }

    /// Looks up a bound service by name.
    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.get(name)
    }

    /// Returns the request identity public keys the endpoint accepts.
    pub fn identity_keys(&self) -> &[String] {
        &self.identity_keys
    }

    /// Builds the manifest view of this endpoint.
    pub fn manifest(&self) -> EndpointManifest {
        EndpointManifest {
            services: self.services.values().map(Into::into).collect(),
            identity_keys: self.identity_keys.clone(),
        }
    }
}

/// Builder for [`Endpoint`].
#[derive(Debug, Default)]
pub struct EndpointBuilder {
    services: Vec<Service>,
    identity_keys: Vec<String>,
}

impl EndpointBuilder {
    /// Binds a service to the endpoint.
    pub fn bind(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    /// Adds one request identity public key.
    pub fn identity_key(mut self, key: impl Into<String>) -> Self {
        self.identity_keys.push(key.into());
        self
    }

    /// Adds several request identity public keys.
    pub fn identity_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identity_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Finishes the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateService`] when two bound services share a
    /// name.
    pub fn build(self) -> Result<Endpoint> {
        let mut services = BTreeMap::new();
        for service in self.services {
            let name = service.name().clone();
            if services.insert(name.clone(), service).is_some() {
                return Err(Error::DuplicateService {
                    name: name.into_string(),
                });
            }
        }
        tracing::debug!(
            services = services.len(),
            identity_keys = self.identity_keys.len(),
            "endpoint built"
        );
        Ok(Endpoint {
            services,
            identity_keys: self.identity_keys,
        })
    }
}
