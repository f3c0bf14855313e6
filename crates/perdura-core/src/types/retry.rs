//! Invocation retry policy.
//!
//! The policy is *described* here and *executed* by the durable runtime.
//! Field semantics follow the runtime's invocation retry model: retries
//! back off exponentially from `initial_interval`, capped at
//! `max_interval`, until `max_attempts` is reached, at which point the
//! invocation is either paused (resumable by an operator) or killed.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lowest accepted exponential backoff factor.
pub const MIN_EXPONENTIATION_FACTOR: f64 = 1.0;
/// Highest accepted exponential backoff factor.
pub const MAX_EXPONENTIATION_FACTOR: f64 = 10.0;

/// What the runtime does with an invocation once retries are exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnMaxAttempts {
    /// Pause the invocation; an operator can resume it later.
    #[default]
    Pause,
    /// Kill the invocation, completing it with the last failure.
    Kill,
}

impl std::fmt::Display for OnMaxAttempts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OnMaxAttempts::Pause => write!(f, "pause"),
            OnMaxAttempts::Kill => write!(f, "kill"),
        }
    }
}

/// Retry policy for failed invocations.
///
/// Serialized with millisecond-granularity duration fields
/// (`initial_interval_ms`, `max_interval_ms`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Interval before the first retry.
    #[serde(
        rename = "initial_interval_ms",
        default = "default_initial_interval",
        with = "crate::time_ms"
    )]
    pub initial_interval: Duration,

    /// Multiplier applied to the interval after each failed attempt.
    #[serde(default = "default_exponentiation_factor")]
    pub exponentiation_factor: f64,

    /// Upper bound on the retry interval. `None` leaves the bound to the
    /// runtime default.
    #[serde(
        rename = "max_interval_ms",
        default = "default_max_interval",
        with = "crate::time_ms::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_interval: Option<Duration>,

    /// Maximum number of attempts, counting the first one. `None` retries
    /// without bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,

    /// Behavior once `max_attempts` is reached.
    #[serde(default)]
    pub on_max_attempts: OnMaxAttempts,
}

fn default_initial_interval() -> Duration {
    Duration::from_millis(100)
}

fn default_exponentiation_factor() -> f64 {
    2.0
}

fn default_max_interval() -> Option<Duration> {
    Some(Duration::from_secs(10))
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_interval: default_initial_interval(),
            exponentiation_factor: default_exponentiation_factor(),
            max_interval: default_max_interval(),
            max_attempts: None,
            on_max_attempts: OnMaxAttempts::default(),
        }
    }
}

impl RetryPolicy {
    /// Sets the initial retry interval.
    pub fn with_initial_interval(mut self, interval: Duration) -> Self {
        self.initial_interval = interval;
        self
    }

    /// Sets the backoff multiplier.
    pub fn with_exponentiation_factor(mut self, factor: f64) -> Self {
        self.exponentiation_factor = factor;
        self
    }

    /// Sets the maximum retry interval.
    pub fn with_max_interval(mut self, interval: Duration) -> Self {
        self.max_interval = Some(interval);
        self
    }

    /// Sets the maximum number of attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Sets the behavior once retries are exhausted.
    pub fn with_on_max_attempts(mut self, behavior: OnMaxAttempts) -> Self {
        self.on_max_attempts = behavior;
        self
    }

    /// Validates the policy for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when an interval is zero, the backoff
    /// factor is out of range, the interval bounds are inverted, or
    /// `max_attempts` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.initial_interval.is_zero() {
            return Err(Error::validation_field(
                "retry_policy.initial_interval_ms",
                "must be greater than zero",
            ));
        }
        if !self.exponentiation_factor.is_finite()
            || self.exponentiation_factor < MIN_EXPONENTIATION_FACTOR
            || self.exponentiation_factor > MAX_EXPONENTIATION_FACTOR
        {
            return Err(Error::validation_field(
                "retry_policy.exponentiation_factor",
                format!(
                    "must be between {MIN_EXPONENTIATION_FACTOR} and {MAX_EXPONENTIATION_FACTOR}"
                ),
            ));
        }
        if let Some(max_interval) = self.max_interval {
            if max_interval < self.initial_interval {
                return Err(Error::validation_field(
                    "retry_policy.max_interval_ms",
                    "must be at least the initial interval",
                ));
            }
        }
        if self.max_attempts == Some(0) {
            return Err(Error::validation_field(
                "retry_policy.max_attempts",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
