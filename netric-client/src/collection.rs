//! Query results hydrated into entities.

use crate::client::Client;
use crate::error::ClientResult;
use crate::events::ClientEvent;
use netric_model::Entity;
use netric_query::Query;
use std::sync::Arc;
use tracing::debug;

/// A query plus the page of entities it last loaded.
#[derive(Debug, Clone)]
pub struct Collection {
    query: Query,
    entities: Vec<Entity>,
    total_num: i64,
}

impl Collection {
    /// Creates an empty collection over `obj_type`.
    pub fn new(obj_type: impl Into<String>) -> Self {
        Self::from_query(Query::new(obj_type))
    }

    pub fn from_query(query: Query) -> Self {
        Self {
            query,
            entities: Vec::new(),
            total_num: 0,
        }
    }

    pub fn obj_type(&self) -> &str {
        self.query.obj_type()
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// The query, for adding conditions, ordering or paging before a load.
    pub fn query_mut(&mut self) -> &mut Query {
        &mut self.query
    }

    /// Executes the query and replaces the loaded page.
    ///
    /// A query without a limit gets the client's default page size.
    pub async fn load(&mut self, client: &Client) -> ClientResult<()> {
        let definition = client.definition(self.query.obj_type()).await?;
        if self.query.get_limit().is_none() {
            self.query.set_limit(client.config().default_limit);
        }

        let payload = self.query.query_to_data();
        debug!(
            obj_type = payload.obj_type.as_str(),
            conditions = payload.conditions.len(),
            limit = ?payload.limit,
            offset = payload.offset,
            "executing query"
        );
        let result = client.transport().execute(&payload).await?;

        self.entities = result
            .entities
            .iter()
            .map(|record| {
                let mut entity = Entity::new(Arc::clone(&definition));
                entity.load_data(record);
                entity
            })
            .collect();
        self.total_num = result.total_num;

        client.events().publish(ClientEvent::CollectionLoaded {
            obj_type: self.obj_type().to_string(),
            total_num: self.total_num,
            num: self.entities.len(),
        });
        Ok(())
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn into_entities(self) -> Vec<Entity> {
        self.entities
    }

    /// Matches across all pages, as reported by the last load.
    pub fn total_num(&self) -> i64 {
        self.total_num
    }

    /// Whether records remain past the loaded page.
    pub fn has_more(&self) -> bool {
        self.query
            .get_offset()
            .max(0)
            .saturating_add(self.entities.len() as i64)
            < self.total_num
    }

    /// Moves the offset forward one page. Returns false, changing nothing,
    /// on the last page or when no positive limit is set.
    pub fn next_page(&mut self) -> bool {
        let Some(limit) = self.page_size() else {
            return false;
        };
        if !self.has_more() {
            return false;
        }
        self.query
            .set_offset(self.query.get_offset().max(0).saturating_add(limit));
        true
    }

    /// Moves the offset back one page, never below zero. Returns false on
    /// the first page.
    pub fn prev_page(&mut self) -> bool {
        let Some(limit) = self.page_size() else {
            return false;
        };
        let offset = self.query.get_offset();
        if offset <= 0 {
            return false;
        }
        self.query.set_offset(offset.saturating_sub(limit).max(0));
        true
    }

    fn page_size(&self) -> Option<i64> {
        self.query.get_limit().filter(|limit| *limit > 0)
    }
}
