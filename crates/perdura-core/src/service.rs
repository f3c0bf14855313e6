//! Service and handler registration records.
//!
//! A [`Service`] is the deployable unit the durable runtime addresses by
//! name; its [`Handler`]s are the callable entry points. Registration
//! carries the invocation configuration verbatim — timeouts, retention,
//! and retry policy are enforced by the runtime, not here.

use crate::codec::{HandlerBinding, PayloadCodec};
use crate::error::{Error, Result};
use crate::types::{HandlerName, RetryPolicy, ServiceName};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Invocation configuration carried on a service or a single handler.
///
/// Every field is optional; `None` means "use the runtime default" (or,
/// for a handler, "fall back to the service value" — see [`layered`]).
///
/// [`layered`]: InvocationConfig::layered
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvocationConfig {
    /// Free-form metadata, surfaced through the runtime's admin API.
    pub metadata: Option<BTreeMap<String, String>>,
    /// How long an invocation may sit idle before the runtime asks it to
    /// suspend, preserving intermediate progress.
    pub inactivity_timeout: Option<Duration>,
    /// How long after the suspension request the runtime waits before
    /// aborting the invocation outright.
    pub abort_timeout: Option<Duration>,
    /// How long the runtime keeps the invocation journal. When a request
    /// carries an idempotency key, the idempotency retention caps this.
    pub journal_retention: Option<Duration>,
    /// Retention period for idempotent request results.
    pub idempotency_retention: Option<Duration>,
    /// When `true`, the service or handler is callable only from other
    /// services, not from the runtime's public ingress.
    pub ingress_private: Option<bool>,
    /// Retry policy for failed invocations.
    pub retry_policy: Option<RetryPolicy>,
}

impl InvocationConfig {
    /// Returns `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns this configuration with every unset field taken from
    /// `base`.
    ///
    /// Useful for computing the effective handler view over its service;
    /// conversions never layer implicitly — the runtime is the authority
    /// on precedence.
    pub fn layered(&self, base: &InvocationConfig) -> InvocationConfig {
        InvocationConfig {
            metadata: self.metadata.clone().or_else(|| base.metadata.clone()),
            inactivity_timeout: self.inactivity_timeout.or(base.inactivity_timeout),
            abort_timeout: self.abort_timeout.or(base.abort_timeout),
            journal_retention: self.journal_retention.or(base.journal_retention),
            idempotency_retention: self.idempotency_retention.or(base.idempotency_retention),
            ingress_private: self.ingress_private.or(base.ingress_private),
            retry_policy: self
                .retry_policy
                .clone()
                .or_else(|| base.retry_policy.clone()),
        }
    }
}

/// Future returned by an erased handler invocation.
pub type HandlerFuture = BoxFuture<'static, Result<Vec<u8>>>;

type ErasedHandlerFn = dyn Fn(Vec<u8>) -> HandlerFuture + Send + Sync;

/// A handler registered on a [`Service`].
///
/// Holds the registration record (name, media types, invocation
/// configuration) plus the type-erased invoke function produced at bind
/// time. The hosting runtime drives [`Handler::invoke`]; the codecs chosen
/// at bind time live inside the erased function.
#[derive(Clone)]
pub struct Handler {
    name: HandlerName,
    accept: String,
    content_type: String,
    config: InvocationConfig,
    invoke_fn: Arc<ErasedHandlerFn>,
}

impl Handler {
    /// Returns the handler name.
    pub fn name(&self) -> &HandlerName {
        &self.name
    }

    /// Returns the media type the handler accepts.
    pub fn accept(&self) -> &str {
        &self.accept
    }

    /// Returns the media type the handler produces.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the handler's invocation configuration.
    pub fn config(&self) -> &InvocationConfig {
        &self.config
    }

    /// Invokes the handler with an encoded input payload.
    ///
    /// Decoding, the user function, and encoding all run inside the
    /// returned future.
    pub fn invoke(&self, input: Vec<u8>) -> HandlerFuture {
        (self.invoke_fn)(input)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name)
            .field("accept", &self.accept)
            .field("content_type", &self.content_type)
            .field("config", &self.config)
            .finish()
    }
}

/// A durable service registration: a named bundle of handlers plus the
/// service-level invocation configuration.
#[derive(Debug, Clone)]
pub struct Service {
    name: ServiceName,
    description: Option<String>,
    config: InvocationConfig,
    handlers: BTreeMap<HandlerName, Handler>,
}

impl Service {
    /// Creates an empty service.
    pub fn new(name: ServiceName) -> Self {
        Self {
            name,
            description: None,
            config: InvocationConfig::default(),
            handlers: BTreeMap::new(),
        }
    }

    /// Sets the human-readable description shown in the runtime's UI and
    /// admin API.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the service-level invocation configuration.
    pub fn with_config(mut self, config: InvocationConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the service name.
    pub fn name(&self) -> &ServiceName {
        &self.name
    }

    /// Returns the service description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the service-level invocation configuration.
    pub fn config(&self) -> &InvocationConfig {
        &self.config
    }

    /// Iterates over registered handlers in name order.
    pub fn handlers(&self) -> impl Iterator<Item = &Handler> {
        self.handlers.values()
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Looks up a handler by name.
    pub fn handler(&self, name: &str) -> Option<&Handler> {
        self.handlers.get(name)
    }

    /// Registers a typed handler function.
    ///
    /// The function is wrapped with the binding's codecs into a
    /// type-erased invoke function; the invocation configuration is
    /// carried verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateHandler`] when a handler with the same
    /// name is already registered.
    pub fn register<I, O, F, Fut, InC, OutC>(
        &mut self,
        name: HandlerName,
        config: InvocationConfig,
        binding: HandlerBinding<InC, OutC>,
        handler_fn: F,
    ) -> Result<()>
    where
        I: Send + 'static,
        O: Send + 'static,
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O>> + Send + 'static,
        InC: PayloadCodec<I> + 'static,
        OutC: PayloadCodec<O> + 'static,
    {
        if self.handlers.contains_key(name.as_str()) {
            return Err(Error::DuplicateHandler {
                name: name.into_string(),
            });
        }

        let HandlerBinding {
            accept,
            content_type,
            input_codec,
            output_codec,
        } = binding;
        let handler_fn = Arc::new(handler_fn);
        let input_codec = Arc::new(input_codec);
        let output_codec = Arc::new(output_codec);

        let invoke_fn: Arc<ErasedHandlerFn> = Arc::new(move |input: Vec<u8>| {
            let handler_fn = Arc::clone(&handler_fn);
            let input_codec = Arc::clone(&input_codec);
            let output_codec = Arc::clone(&output_codec);
            async move {
                let decoded = input_codec.decode(&input)?;
                let output = handler_fn(decoded).await?;
                output_codec.encode(&output)
            }
            .boxed()
        });

        tracing::debug!(service = %self.name, handler = %name, accept, content_type, "handler registered");

        self.handlers.insert(
            name.clone(),
            Handler {
                name,
                accept,
                content_type,
                config,
                invoke_fn,
            },
        );
        Ok(())
    }
}
