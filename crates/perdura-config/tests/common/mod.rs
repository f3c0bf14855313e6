//! Common test utilities for configuration integration tests.

use std::io::Write;
use tempfile::NamedTempFile;

/// A representative configuration covering settings, service options,
/// nested retry policy, metadata, and declared handlers.
pub const SAMPLE_CONFIG: &str = r#"
[settings]
identity_keys = ["pk-prod-1", "pk-prod-2"]

[[service]]
name = "checkout"
description = "Order checkout"
inactivity_timeout_ms = 60000
abort_timeout_ms = 30000
idempotency_retention_ms = 3600000

[service.metadata]
team = "payments"
tier = "critical"

[service.retry_policy]
initial_interval_ms = 100
exponentiation_factor = 2.0
max_interval_ms = 10000
max_attempts = 5
on_max_attempts = "kill"

[[service.handler]]
name = "submit"
journal_retention_ms = 86400000

[[service.handler]]
name = "cancel"
ingress_private = true

[[service]]
name = "notifier"
ingress_private = true
"#;

/// Writes `content` to a temporary file and returns the handle; the file
/// is removed when the handle drops.
pub fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config file");
    file.write_all(content.as_bytes())
        .expect("write temp config file");
    file.flush().expect("flush temp config file");
    file
}
