//! Core value types shared across the registration surface.

mod ids;
mod proptests;
mod retry;

pub use ids::{HandlerName, ServiceName, MAX_NAME_LENGTH};
pub use retry::{
    OnMaxAttempts, RetryPolicy, MAX_EXPONENTIATION_FACTOR, MIN_EXPONENTIATION_FACTOR,
};
