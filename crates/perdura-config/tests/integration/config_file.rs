//! Integration tests for loading configuration files from disk.

use perdura_config::{ConfigError, ConfigFile, MAX_CONFIG_FILE_SIZE};
use std::time::Duration;

use crate::common::{write_config, SAMPLE_CONFIG};

#[test]
fn test_load_sample_config_from_disk() {
    let file = write_config(SAMPLE_CONFIG);

    let config = ConfigFile::load(Some(file.path())).expect("sample config should load");

    assert_eq!(config.settings.identity_keys, ["pk-prod-1", "pk-prod-2"]);
    assert_eq!(config.services.len(), 2);

    let checkout = config.service("checkout").expect("checkout declared");
    assert_eq!(
        checkout.options.invocation.inactivity_timeout,
        Some(Duration::from_secs(60))
    );
    assert_eq!(
        checkout.options.invocation.idempotency_retention,
        Some(Duration::from_secs(3_600))
    );
    let metadata = checkout.options.invocation.metadata.as_ref().unwrap();
    assert_eq!(metadata.get("team").map(String::as_str), Some("payments"));
    assert_eq!(checkout.handlers.len(), 2);

    let notifier = config.service("notifier").expect("notifier declared");
    assert_eq!(notifier.options.invocation.ingress_private, Some(true));
    assert!(notifier.handlers.is_empty());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = ConfigFile::load(Some(std::path::Path::new("/nonexistent/perdura.toml")))
        .expect_err("missing file should fail");
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_invalid_value_fails_closed() {
    let file = write_config(
        "[[service]]\nname = \"checkout\"\ninactivity_timeout_ms = 0\n",
    );
    let err = ConfigFile::load(Some(file.path())).expect_err("zero timeout should fail");
    assert!(err.is_validation());
}

#[test]
fn test_unknown_field_is_ignored() {
    // Forward compatibility: unknown keys are ignored, not fatal.
    let file = write_config("[[service]]\nname = \"checkout\"\nfuture_knob = true\n");
    let config = ConfigFile::load(Some(file.path())).expect("unknown keys should be ignored");
    assert_eq!(config.services.len(), 1);
}

#[test]
fn test_oversized_file_rejected() {
    let padding = format!(
        "[[service]]\nname = \"checkout\"\ndescription = \"{}\"\n",
        "x".repeat(MAX_CONFIG_FILE_SIZE)
    );
    let file = write_config(&padding);
    let err = ConfigFile::load(Some(file.path())).expect_err("oversized file should fail");
    assert!(err.is_validation());
}

#[test]
fn test_non_utf8_file_rejected() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0xff, 0xfe, 0x00, 0x01]).unwrap();
    file.flush().unwrap();

    let err = ConfigFile::load(Some(file.path())).expect_err("binary file should fail");
    assert!(err.is_validation());
}

#[test]
fn test_loaded_config_roundtrips_through_toml() {
    let file = write_config(SAMPLE_CONFIG);
    let config = ConfigFile::load(Some(file.path())).unwrap();

    let serialized = toml::to_string(&config).expect("config should serialize");
    let reloaded = ConfigFile::from_toml_str(&serialized).expect("serialized config should parse");
    assert_eq!(config, reloaded);
}
