//! The client facade.

use crate::collection::Collection;
use crate::config::ClientConfig;
use crate::definitions::DefinitionLoader;
use crate::error::{ClientError, ClientResult};
use crate::events::{ClientEvent, EventBus};
use crate::transport::Transport;
use netric_model::{DefaultOn, Entity, EntityDefinition};
use netric_query::Query;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Ties a [`Transport`] to the definition cache and the event bus.
///
/// Entities and collections handed out by the client are plain values
/// owned by the caller; only definitions are shared.
pub struct Client {
    transport: Arc<dyn Transport>,
    definitions: DefinitionLoader,
    events: EventBus,
    config: ClientConfig,
}

impl Client {
    pub fn new(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        let events = EventBus::new(config.event_capacity);
        let definitions =
            DefinitionLoader::new(Arc::clone(&transport), config.cache_definitions, events.clone());
        Self {
            transport,
            definitions,
            events,
            config,
        }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub fn definitions(&self) -> &DefinitionLoader {
        &self.definitions
    }

    /// The definition of `obj_type`, from cache when possible.
    pub async fn definition(&self, obj_type: &str) -> ClientResult<Arc<EntityDefinition>> {
        self.definitions.get(obj_type).await
    }

    /// A new, unsaved entity with its `create` defaults applied.
    pub async fn create_entity(&self, obj_type: &str) -> ClientResult<Entity> {
        let definition = self.definition(obj_type).await?;
        Ok(Entity::create(definition))
    }

    /// An empty collection over `obj_type`.
    pub fn query(&self, obj_type: &str) -> Collection {
        Collection::new(obj_type)
    }

    /// Loads one page of `collection`.
    pub async fn load_collection(&self, collection: &mut Collection) -> ClientResult<()> {
        collection.load(self).await
    }

    /// Loads a single entity by id.
    pub async fn load_entity(&self, obj_type: &str, id: &str) -> ClientResult<Entity> {
        let definition = self.definition(obj_type).await?;

        let mut query = Query::new(obj_type);
        query.where_field("id").equal_to(id);
        query.set_limit(1);
        let result = self.transport.execute(&query.query_to_data()).await?;

        let Some(record) = result.entities.first() else {
            warn!(obj_type, id, "entity not found");
            return Err(ClientError::NotFound {
                obj_type: obj_type.to_string(),
                id: id.to_string(),
            });
        };
        let mut entity = Entity::new(definition);
        entity.load_data(record);
        debug!(obj_type, id, "entity loaded");

        self.events.publish(ClientEvent::EntityLoaded {
            obj_type: obj_type.to_string(),
            id: id.to_string(),
        });
        Ok(entity)
    }

    /// Saves an entity and refreshes it from the stored record.
    ///
    /// `update` defaults are applied first, so they fire on every save.
    pub async fn save_entity(&self, entity: &mut Entity) -> ClientResult<()> {
        let created = entity.is_new();
        entity.set_default_values(DefaultOn::Update, None);

        let saved = self.transport.save(&entity.get_data()).await?;
        entity.load_data(&saved);

        let Some(id) = entity.id().map(str::to_string) else {
            return Err(ClientError::Rejected(format!(
                "saved {} record came back without an id",
                entity.obj_type()
            )));
        };
        info!(obj_type = entity.obj_type(), id = id.as_str(), created, "entity saved");

        self.events.publish(ClientEvent::EntitySaved {
            obj_type: entity.obj_type().to_string(),
            id,
            created,
        });
        Ok(())
    }
}
