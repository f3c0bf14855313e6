#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Perdura Core Library
//!
//! Registration surface for durable service endpoints: names, retry
//! policies, payload codecs, service/handler records, and the discovery
//! manifest.

pub mod codec;
pub mod endpoint;
pub mod error;
pub mod manifest;
pub mod service;
pub mod time_ms;
pub mod types;

// Re-exports for convenience
pub use codec::{HandlerBinding, JsonCodec, PayloadCodec, RawCodec};
pub use endpoint::{Endpoint, EndpointBuilder};
pub use error::{Error, Result};
pub use manifest::{ConfigManifest, EndpointManifest, HandlerManifest, ServiceManifest};
pub use service::{Handler, HandlerFuture, InvocationConfig, Service};
pub use types::{HandlerName, OnMaxAttempts, RetryPolicy, ServiceName};
