//! Shared test helpers for client tests.

#![allow(dead_code)]

use netric_client::transport::mock::MemoryTransport;
use netric_client::{Client, ClientConfig, EntityPayload};
use netric_model::{DefaultOn, EntityDefinition, FieldDefinition};
use serde_json::{Value, json};
use std::sync::Arc;

/// The `customer` type used across client tests.
pub fn customer_definition() -> EntityDefinition {
    EntityDefinition::new("customer")
        .with_title("Contact")
        .with_field(FieldDefinition::text("name"))
        .with_field(FieldDefinition::number("revenue"))
        .with_field(FieldDefinition::bool("f_active").with_default(DefaultOn::Create, true))
        .with_field(FieldDefinition::text("source").with_default(DefaultOn::Update, "web"))
        .with_field(FieldDefinition::object("owner_id", "user"))
        .with_field(FieldDefinition::fkey_multi("categories", "groupings"))
}

pub fn record(value: Value) -> EntityPayload {
    match value {
        Value::Object(map) => map,
        _ => panic!("test record must be an object"),
    }
}

/// A transport pre-loaded with five customers.
pub async fn seeded_transport() -> Arc<MemoryTransport> {
    let transport = Arc::new(MemoryTransport::new());
    transport.add_definition(customer_definition()).await;

    let rows = [
        json!({"id": "1", "name": "Acme", "revenue": 500, "owner_id": 7, "owner_id_fval": "Jane",
               "categories": [1, 2], "categories_fval": {"1": "Partner", "2": "Vendor"}}),
        json!({"id": "2", "name": "Globex", "revenue": 1500, "categories": [2]}),
        json!({"id": "3", "name": "Initech", "revenue": 250, "categories": []}),
        json!({"id": "4", "name": "Acme Labs", "revenue": 900, "categories": [1]}),
        json!({"id": "5", "name": "Umbrella", "revenue": 3000, "categories": [3]}),
    ];
    for row in rows {
        transport.insert_record("customer", record(row)).await;
    }
    transport
}

pub fn client_for(transport: Arc<MemoryTransport>) -> Client {
    Client::new(transport, ClientConfig::default())
}

/// Log output for a test run, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
