mod common;

use common::{client_for, customer_definition, init_tracing, seeded_transport};
use netric_client::transport::mock::MemoryTransport;
use netric_client::{Client, ClientConfig, ClientError, ClientEvent};
use serde_json::json;
use std::sync::Arc;

// ── Definitions ──────────────────────────────────────────────────

#[tokio::test]
async fn definition_is_fetched_once_when_cached() {
    let transport = seeded_transport().await;
    let client = client_for(Arc::clone(&transport));

    let a = client.definition("customer").await.unwrap();
    let b = client.definition("customer").await.unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(transport.definition_fetches(), 1);
    assert!(client.definitions().is_cached("customer").await);
}

#[tokio::test]
async fn definition_cache_can_be_disabled() {
    let transport = seeded_transport().await;
    let config = ClientConfig {
        cache_definitions: false,
        ..Default::default()
    };
    let client = Client::new(transport.clone(), config);

    client.definition("customer").await.unwrap();
    client.definition("customer").await.unwrap();
    assert_eq!(transport.definition_fetches(), 2);
    assert!(!client.definitions().is_cached("customer").await);
}

#[tokio::test]
async fn clearing_the_cache_refetches() {
    let transport = seeded_transport().await;
    let client = client_for(Arc::clone(&transport));

    client.definition("customer").await.unwrap();
    client.definitions().clear().await;
    client.definition("customer").await.unwrap();
    assert_eq!(transport.definition_fetches(), 2);
}

#[tokio::test]
async fn seeded_definition_skips_fetch() {
    let transport = Arc::new(MemoryTransport::new());
    let client = client_for(Arc::clone(&transport));

    client.definitions().insert(customer_definition()).await;
    let def = client.definition("customer").await.unwrap();
    assert_eq!(def.obj_type(), "customer");
    assert_eq!(transport.definition_fetches(), 0);
}

#[tokio::test]
async fn unknown_definition_is_an_error() {
    let client = client_for(seeded_transport().await);
    let err = client.definition("spaceship").await.unwrap_err();
    assert!(matches!(err, ClientError::DefinitionNotFound(t) if t == "spaceship"));
}

// ── Entities ─────────────────────────────────────────────────────

#[tokio::test]
async fn create_entity_applies_create_defaults() {
    let client = client_for(seeded_transport().await);
    let e = client.create_entity("customer").await.unwrap();

    assert!(e.is_new());
    assert_eq!(e.get_value("f_active"), Some(&json!(true)));
    assert!(e.get_value("source").is_none());
}

#[tokio::test]
async fn load_entity_hydrates_labels() {
    init_tracing();
    let client = client_for(seeded_transport().await);
    let e = client.load_entity("customer", "1").await.unwrap();

    assert_eq!(e.id(), Some("1"));
    assert_eq!(e.get_name().as_deref(), Some("Acme"));
    assert_eq!(e.get_value_name("owner_id", None), Some("Jane"));
    assert_eq!(e.get_value_name("categories", Some(&json!(2))), Some("Vendor"));
}

#[tokio::test]
async fn load_missing_entity_is_not_found() {
    let client = client_for(seeded_transport().await);
    let err = client.load_entity("customer", "999").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { ref id, .. } if id == "999"));
}

#[tokio::test]
async fn save_new_entity_assigns_id() {
    let transport = seeded_transport().await;
    let client = client_for(Arc::clone(&transport));

    let mut e = client.create_entity("customer").await.unwrap();
    e.set_value("name", "Hooli", None);
    e.add_multi_value("categories", 4, Some("Prospect"));
    client.save_entity(&mut e).await.unwrap();

    let id = e.id().map(str::to_string).unwrap();
    assert!(!e.is_new());
    assert_eq!(e.get_value("source"), Some(&json!("web")));

    let reloaded = client.load_entity("customer", &id).await.unwrap();
    assert_eq!(reloaded.get_value("name"), Some(&json!("Hooli")));
    assert_eq!(reloaded.get_value_name("categories", Some(&json!(4))), Some("Prospect"));
    assert_eq!(transport.records("customer").await.len(), 6);
}

#[tokio::test]
async fn save_existing_entity_updates_in_place() {
    let transport = seeded_transport().await;
    let client = client_for(Arc::clone(&transport));

    let mut e = client.load_entity("customer", "2").await.unwrap();
    e.set_value("revenue", 1750, None);
    client.save_entity(&mut e).await.unwrap();

    assert_eq!(e.id(), Some("2"));
    assert_eq!(transport.records("customer").await.len(), 5);
    let reloaded = client.load_entity("customer", "2").await.unwrap();
    assert_eq!(reloaded.get_value("revenue"), Some(&json!(1750)));
}

#[tokio::test]
async fn update_defaults_do_not_overwrite_on_save() {
    let client = client_for(seeded_transport().await);
    let mut e = client.create_entity("customer").await.unwrap();
    e.set_value("source", "referral", None);
    client.save_entity(&mut e).await.unwrap();
    assert_eq!(e.get_value("source"), Some(&json!("referral")));
}

// ── Events ───────────────────────────────────────────────────────

#[tokio::test]
async fn client_publishes_lifecycle_events() {
    let client = client_for(seeded_transport().await);
    let mut rx = client.subscribe();

    let mut e = client.create_entity("customer").await.unwrap();
    e.set_value("name", "Hooli", None);
    client.save_entity(&mut e).await.unwrap();
    let id = e.id().map(str::to_string).unwrap();
    client.load_entity("customer", &id).await.unwrap();

    assert_eq!(
        rx.recv().await.unwrap(),
        ClientEvent::DefinitionLoaded { obj_type: "customer".into() }
    );
    assert_eq!(
        rx.recv().await.unwrap(),
        ClientEvent::EntitySaved {
            obj_type: "customer".into(),
            id: id.clone(),
            created: true,
        }
    );
    assert_eq!(
        rx.recv().await.unwrap(),
        ClientEvent::EntityLoaded { obj_type: "customer".into(), id }
    );
}

#[tokio::test]
async fn separate_clients_have_separate_buses() {
    let transport = seeded_transport().await;
    let first = client_for(Arc::clone(&transport));
    let second = client_for(Arc::clone(&transport));
    let mut rx = second.subscribe();

    first.definition("customer").await.unwrap();
    assert!(rx.try_recv().is_err());
}
