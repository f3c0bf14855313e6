//! Error types for the Perdura core library.

/// Errors that can occur while building or inspecting endpoint registrations.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A value failed validation (bad name, bad retry policy, bad limit).
    #[error("Validation error: {message}")]
    Validation {
        /// Field or aspect that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// A payload could not be encoded with the configured codec.
    #[error("Encode error: {message}")]
    Encode {
        /// What went wrong
        message: String,
    },

    /// A payload could not be decoded with the configured codec.
    #[error("Decode error: {message}")]
    Decode {
        /// What went wrong
        message: String,
    },

    /// A handler with the same name is already registered on the service.
    #[error("Handler already registered: {name}")]
    DuplicateHandler {
        /// Name of the conflicting handler
        name: String,
    },

    /// A service with the same name is already bound to the endpoint.
    #[error("Service already bound: {name}")]
    DuplicateService {
        /// Name of the conflicting service
        name: String,
    },

    /// No handler with the given name is registered on the service.
    #[error("Handler not found: {name}")]
    HandlerNotFound {
        /// Name of the missing handler
        name: String,
    },

    /// A handler function returned an error.
    #[error("Handler error: {message}")]
    Handler {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Convenience `Result` type alias for Perdura operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new encode error.
    pub fn encode<S: Into<String>>(message: S) -> Self {
        Error::Encode {
            message: message.into(),
        }
    }

    /// Creates a new decode error.
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    /// Creates a new handler error with a message.
    pub fn handler<S: Into<String>>(message: S) -> Self {
        Error::Handler {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new handler error with a message and source error.
    pub fn handler_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Handler {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns whether this error came from validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Returns whether this error came from a payload codec.
    pub fn is_codec(&self) -> bool {
        matches!(self, Error::Encode { .. } | Error::Decode { .. })
    }
}
