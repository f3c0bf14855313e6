//! Validated name types for services and handlers.
//!
//! The durable runtime addresses services and handlers by name, so names
//! are validated at construction rather than at deployment time. The
//! grammar: first character ASCII alphabetic or `_`, remaining characters
//! ASCII alphanumeric or `-`, `_`, `.`, at most 255 bytes.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Maximum length of a service or handler name, in bytes.
pub const MAX_NAME_LENGTH: usize = 255;

fn validate_name(name: &str, what: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::validation_field(what, "must not be empty"));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(Error::validation_field(
            what,
            format!("must be at most {MAX_NAME_LENGTH} bytes"),
        ));
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => {
            return Err(Error::validation_field(
                what,
                "must start with an ASCII letter or underscore",
            ));
        }
    }
    for c in chars {
        if !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')) {
            return Err(Error::validation_field(
                what,
                format!("contains invalid character {c:?}"),
            ));
        }
    }
    Ok(())
}

/// Validated name of a durable service.
///
/// # Examples
///
/// ```
/// use perdura_core::ServiceName;
///
/// let name = ServiceName::new("checkout")?;
/// assert_eq!(name.as_str(), "checkout");
/// assert!(ServiceName::new("no spaces").is_err());
/// # Ok::<(), perdura_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceName(String);

impl ServiceName {
    /// Creates a service name, validating the grammar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the name is empty, too long, or
    /// contains characters outside the allowed set.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name, "service name")?;
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the name, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ServiceName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ServiceName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for ServiceName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ServiceName> for String {
    fn from(name: ServiceName) -> Self {
        name.0
    }
}

/// Validated name of a service handler.
///
/// Same grammar as [`ServiceName`]; handler names only need to be unique
/// within their service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HandlerName(String);

impl HandlerName {
    /// Creates a handler name, validating the grammar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the name is empty, too long, or
    /// contains characters outside the allowed set.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name, "handler name")?;
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the name, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for HandlerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for HandlerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for HandlerName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for HandlerName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for HandlerName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<HandlerName> for String {
    fn from(name: HandlerName) -> Self {
        name.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_service_name_accepts_typical_names() {
        for name in ["checkout", "order_v2", "Greeter", "a", "_internal", "svc.billing"] {
            assert!(ServiceName::new(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_service_name_rejects_bad_names() {
        for name in ["", " ", "1checkout", "-lead", ".lead", "has space", "emoji🚀", "a/b"] {
            assert!(ServiceName::new(name).is_err(), "{name:?} should be invalid");
        }
    }

    #[test]
    fn test_name_length_limit() {
        let max = "a".repeat(MAX_NAME_LENGTH);
        assert!(ServiceName::new(max.clone()).is_ok());
        assert!(ServiceName::new(max + "a").is_err());
    }

    #[test]
    fn test_service_name_display() {
        let name = ServiceName::new("checkout").unwrap();
        assert_eq!(name.to_string(), "checkout");
    }

    #[test]
    fn test_service_name_from_str() {
        let name: ServiceName = "checkout".parse().unwrap();
        assert_eq!(name.as_str(), "checkout");
        assert!("not valid!".parse::<ServiceName>().is_err());
    }

    #[test]
    fn test_service_name_serde_validates() {
        let name: ServiceName = serde_json::from_str(r#""checkout""#).unwrap();
        assert_eq!(name.as_str(), "checkout");
        assert!(serde_json::from_str::<ServiceName>(r#""has space""#).is_err());
    }

    #[test]
    fn test_service_name_serializes_as_string() {
        let name = ServiceName::new("checkout").unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), r#""checkout""#);
    }

    #[test]
    fn test_handler_name_roundtrip() {
        let name = HandlerName::new("submit_order").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        let back: HandlerName = serde_json::from_str(&json).unwrap();
        assert_eq!(name, back);
    }

    #[test]
    fn test_handler_name_rejects_empty() {
        assert!(HandlerName::new("").is_err());
    }
}
