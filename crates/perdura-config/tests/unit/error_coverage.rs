//! Comprehensive tests for error handling and coverage.

use perdura_config::{ConfigError, ConfigFile};

#[test]
fn test_parse_error_message() {
    let err = ConfigFile::from_toml_str("= broken").unwrap_err();
    let ConfigError::Parse(message) = err else {
        unreachable!("Expected Parse error");
    };
    assert!(!message.is_empty());
}

#[test]
fn test_invalid_field_carried() {
    let err = ConfigFile::from_toml_str(
        "[[service]]\nname = \"checkout\"\nabort_timeout_ms = 0\n",
    )
    .unwrap_err();
    match &err {
        ConfigError::Invalid { field, message } => {
            assert_eq!(field.as_deref(), Some("abort_timeout_ms"));
            assert!(message.contains("greater than zero"));
        }
        other => unreachable!("Expected Invalid error, got {other:?}"),
    }
}

#[test]
fn test_core_error_is_transparent() {
    let core_err = perdura_core::Error::validation("bad");
    let err: ConfigError = core_err.into();
    assert_eq!(err.to_string(), "Validation error: bad");
}

#[test]
fn test_bad_name_surfaces_core_validation() {
    let err = ConfigFile::from_toml_str("[[service]]\nname = \"1checkout\"\n").unwrap_err();
    assert!(err.is_validation());
    assert!(matches!(err, ConfigError::Core(_)));
}

#[test]
fn test_negative_duration_is_parse_error() {
    let err = ConfigFile::from_toml_str(
        "[[service]]\nname = \"checkout\"\ninactivity_timeout_ms = -5\n",
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_error_debug_formatting() {
    let err = ConfigError::invalid_field("metadata", "too many entries");
    let debug = format!("{err:?}");
    assert!(debug.contains("Invalid"));
    assert!(debug.contains("metadata"));
}

#[test]
fn test_retry_policy_error_field_path() {
    let err = ConfigFile::from_toml_str(
        "[[service]]\nname = \"checkout\"\n\n[service.retry_policy]\nmax_attempts = 0\n",
    )
    .unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("at least 1"));
}
