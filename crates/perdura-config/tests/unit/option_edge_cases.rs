//! Edge-case tests for option schemas.

use perdura_config::{ConfigFile, HandlerOptions, InvocationOptions, ServiceOptions};
use perdura_core::codec::{HandlerBinding, RawCodec};
use std::time::Duration;

#[test]
fn test_minimal_service_entry() {
    let config = ConfigFile::from_toml_str("[[service]]\nname = \"ping\"\n").unwrap();
    let entry = config.service("ping").unwrap();
    assert!(entry.options.invocation == InvocationOptions::default());

    let service = entry.options.new_service().unwrap();
    assert!(service.config().is_empty());
    assert_eq!(service.description(), None);
}

#[test]
fn test_boundary_durations_accepted() {
    let options = InvocationOptions::new()
        .with_inactivity_timeout(Duration::from_millis(1))
        .with_journal_retention(Duration::from_millis(1));
    assert!(options.validate().is_ok());

    let options = InvocationOptions::new()
        .with_inactivity_timeout(perdura_config::options::MAX_TIMEOUT)
        .with_journal_retention(perdura_config::options::MAX_RETENTION);
    assert!(options.validate().is_ok());
}

#[test]
fn test_dotted_and_underscored_names() {
    assert!(ServiceOptions::new("svc.billing_v2").new_service().is_ok());
    assert!(ServiceOptions::new("_internal").new_service().is_ok());
}

#[tokio::test]
async fn test_unnamed_handler_options_use_fallback() {
    let mut service = ServiceOptions::new("echo").new_service().unwrap();
    let options = HandlerOptions::new();

    options
        .bind_with(
            &mut service,
            "echo_bytes",
            HandlerBinding::with_codecs::<Vec<u8>, Vec<u8>>(RawCodec, RawCodec),
            |bytes: Vec<u8>| async move { Ok(bytes) },
        )
        .unwrap();

    let handler = service.handler("echo_bytes").unwrap();
    assert_eq!(handler.accept(), "application/octet-stream");

    let output = handler.invoke(vec![1, 2, 3]).await.unwrap();
    assert_eq!(output, vec![1, 2, 3]);
}

#[test]
fn test_handler_options_without_name_rejected_in_file_only() {
    // In code, unnamed handler options are fine (the fallback applies) …
    assert!(HandlerOptions::new().validate().is_ok());

    // … but a file-declared handler must carry its name.
    let err = ConfigFile::from_toml_str(
        "[[service]]\nname = \"echo\"\n\n[[service.handler]]\njournal_retention_ms = 1000\n",
    )
    .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_metadata_at_entry_limit_accepted() {
    let mut options = InvocationOptions::new();
    for i in 0..perdura_config::options::MAX_METADATA_ENTRIES {
        options = options.with_metadata_entry(format!("key-{i}"), "value");
    }
    assert!(options.validate().is_ok());
}

#[test]
fn test_ms_fields_reject_fractional_values() {
    let err = ConfigFile::from_toml_str(
        "[[service]]\nname = \"checkout\"\ninactivity_timeout_ms = 1.5\n",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        perdura_config::ConfigError::Parse(_)
    ));
}
