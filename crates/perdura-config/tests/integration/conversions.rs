//! Integration tests for the options-to-registration conversions.

use perdura_config::ConfigFile;
use perdura_core::{Endpoint, OnMaxAttempts};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::common::{write_config, SAMPLE_CONFIG};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Order {
    id: String,
    amount: u64,
}

#[tokio::test]
async fn test_config_to_bound_service_end_to_end() {
    let file = write_config(SAMPLE_CONFIG);
    let config = ConfigFile::load(Some(file.path())).unwrap();
    let entry = config.service("checkout").unwrap();

    let mut service = entry.options.new_service().unwrap();

    entry
        .handler("submit")
        .unwrap()
        .bind(&mut service, "submit", |order: Order| async move {
            Ok(Order {
                amount: order.amount + 100,
                ..order
            })
        })
        .unwrap();
    entry
        .handler("cancel")
        .unwrap()
        .bind(&mut service, "cancel", |order: Order| async move { Ok(order) })
        .unwrap();

    assert_eq!(service.handler_count(), 2);

    // Handler options were passed through to the registration.
    let submit = service.handler("submit").unwrap();
    assert_eq!(
        submit.config().journal_retention,
        Some(Duration::from_secs(86_400))
    );
    let cancel = service.handler("cancel").unwrap();
    assert_eq!(cancel.config().ingress_private, Some(true));

    // The bound handler is callable through its codecs.
    let input = serde_json::to_vec(&Order {
        id: "ord-1".to_string(),
        amount: 1200,
    })
    .unwrap();
    let output = submit.invoke(input).await.unwrap();
    let order: Order = serde_json::from_slice(&output).unwrap();
    assert_eq!(order.amount, 1300);
}

#[test]
fn test_service_level_fields_pass_through() {
    let config = ConfigFile::from_toml_str(SAMPLE_CONFIG).unwrap();
    let entry = config.service("checkout").unwrap();
    let service = entry.options.new_service().unwrap();

    assert_eq!(service.name().as_str(), "checkout");
    assert_eq!(service.description(), Some("Order checkout"));

    let config = service.config();
    assert_eq!(config.inactivity_timeout, Some(Duration::from_secs(60)));
    assert_eq!(config.abort_timeout, Some(Duration::from_secs(30)));
    assert_eq!(config.idempotency_retention, Some(Duration::from_secs(3_600)));

    let policy = config.retry_policy.as_ref().unwrap();
    assert_eq!(policy.initial_interval, Duration::from_millis(100));
    assert_eq!(policy.max_interval, Some(Duration::from_secs(10)));
    assert_eq!(policy.max_attempts, Some(5));
    assert_eq!(policy.on_max_attempts, OnMaxAttempts::Kill);
}

#[test]
fn test_settings_feed_the_endpoint() {
    let config = ConfigFile::from_toml_str(SAMPLE_CONFIG).unwrap();

    let mut builder = Endpoint::builder();
    for service in config.build_services().unwrap() {
        builder = builder.bind(service);
    }
    let endpoint = config.settings.apply(builder).build().unwrap();

    assert_eq!(endpoint.identity_keys(), ["pk-prod-1", "pk-prod-2"]);
    assert!(endpoint.service("checkout").is_some());
    assert!(endpoint.service("notifier").is_some());
}

#[test]
fn test_declared_manifest_matches_config() {
    let config = ConfigFile::from_toml_str(SAMPLE_CONFIG).unwrap();
    let manifest = config.manifest().unwrap();

    assert_eq!(manifest.identity_keys.len(), 2);
    assert_eq!(manifest.services.len(), 2);

    let checkout = &manifest.services[0];
    assert_eq!(checkout.name.as_str(), "checkout");
    assert_eq!(checkout.config.inactivity_timeout_ms, Some(60_000));
    assert_eq!(checkout.handlers.len(), 2);
    assert_eq!(checkout.handlers[0].name.as_str(), "submit");
    assert_eq!(
        checkout.handlers[0].config.journal_retention_ms,
        Some(86_400_000)
    );

    let json = serde_json::to_value(&manifest).unwrap();
    assert_eq!(json["services"][0]["name"], "checkout");
    assert_eq!(
        json["services"][0]["config"]["retry_policy"]["on_max_attempts"],
        "kill"
    );
}

#[tokio::test]
async fn test_bound_manifest_reflects_registered_handlers() {
    let config = ConfigFile::from_toml_str(SAMPLE_CONFIG).unwrap();
    let entry = config.service("checkout").unwrap();
    let mut service = entry.options.new_service().unwrap();

    entry
        .handler("submit")
        .unwrap()
        .bind(&mut service, "submit", |order: Order| async move { Ok(order) })
        .unwrap();

    let manifest = service.manifest();
    assert_eq!(manifest.handlers.len(), 1);
    assert_eq!(manifest.handlers[0].name.as_str(), "submit");
    assert_eq!(manifest.handlers[0].accept, "application/json");
}
