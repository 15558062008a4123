//! Definition cache.

use crate::error::ClientResult;
use crate::events::{ClientEvent, EventBus};
use crate::transport::Transport;
use netric_model::EntityDefinition;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Fetches definitions through the transport and shares them as
/// `Arc<EntityDefinition>`.
///
/// With caching on, each object type is fetched once per loader.
pub struct DefinitionLoader {
    transport: Arc<dyn Transport>,
    cache: RwLock<HashMap<String, Arc<EntityDefinition>>>,
    cache_enabled: bool,
    events: EventBus,
}

impl DefinitionLoader {
    pub fn new(transport: Arc<dyn Transport>, cache_enabled: bool, events: EventBus) -> Self {
        Self {
            transport,
            cache: RwLock::new(HashMap::new()),
            cache_enabled,
            events,
        }
    }

    /// Returns the definition of `obj_type`, fetching it if needed.
    pub async fn get(&self, obj_type: &str) -> ClientResult<Arc<EntityDefinition>> {
        if self.cache_enabled {
            if let Some(def) = self.cache.read().await.get(obj_type) {
                debug!(obj_type, "definition cache hit");
                return Ok(Arc::clone(def));
            }
        }

        let fetched = Arc::new(self.transport.fetch_definition(obj_type).await?);
        info!(obj_type, fields = fetched.field_count(), "definition loaded");
        self.events.publish(ClientEvent::DefinitionLoaded {
            obj_type: obj_type.to_string(),
        });

        if !self.cache_enabled {
            return Ok(fetched);
        }
        // A concurrent fetch may have landed first; keep whichever is cached.
        let mut cache = self.cache.write().await;
        Ok(Arc::clone(
            cache.entry(obj_type.to_string()).or_insert(fetched),
        ))
    }

    /// Seeds the cache, e.g. with definitions bundled at startup.
    pub async fn insert(&self, definition: EntityDefinition) -> Arc<EntityDefinition> {
        let def = Arc::new(definition);
        if self.cache_enabled {
            self.cache
                .write()
                .await
                .insert(def.obj_type().to_string(), Arc::clone(&def));
        }
        def
    }

    pub async fn is_cached(&self, obj_type: &str) -> bool {
        self.cache.read().await.contains_key(obj_type)
    }

    /// Drops every cached definition. Entities keep the ones they hold.
    pub async fn clear(&self) {
        self.cache.write().await.clear();
    }
}
