//! Millisecond-based serde helpers for durations.
//!
//! Config files and manifests carry durations as integer milliseconds
//! (`inactivity_timeout_ms = 60000`); in memory they are
//! [`std::time::Duration`]. Use `#[serde(with = "time_ms")]` for required
//! fields and `#[serde(with = "time_ms::option")]` for optional ones.

use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

/// Serializes a duration as integer milliseconds.
///
/// # Errors
///
/// Fails when the duration exceeds `u64::MAX` milliseconds.
pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let ms = u64::try_from(value.as_millis())
        .map_err(|_| serde::ser::Error::custom("duration overflows u64 milliseconds"))?;
    serializer.serialize_u64(ms)
}

/// Deserializes a duration from integer milliseconds.
///
/// # Errors
///
/// Fails when the underlying value is not a non-negative integer.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let ms = u64::deserialize(deserializer)?;
    Ok(Duration::from_millis(ms))
}

/// Millisecond serde helpers for `Option<Duration>` fields.
pub mod option {
    use super::*;

    /// Serializes an optional duration as integer milliseconds.
    ///
    /// # Errors
    ///
    /// Fails when the duration exceeds `u64::MAX` milliseconds.
    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(duration) => {
                let ms = u64::try_from(duration.as_millis()).map_err(|_| {
                    serde::ser::Error::custom("duration overflows u64 milliseconds")
                })?;
                serializer.serialize_some(&ms)
            }
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional duration from integer milliseconds.
    ///
    /// # Errors
    ///
    /// Fails when the underlying value is present but not a non-negative
    /// integer.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = Option::<u64>::deserialize(deserializer)?;
        Ok(ms.map(Duration::from_millis))
    }
}

/// Converts a duration to saturating integer milliseconds.
///
/// Used when building manifests, where a clamped value is preferable to a
/// serialization failure.
pub fn saturating_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
