//! Transport layer abstraction.
//!
//! The client never speaks HTTP itself. Everything that crosses the wire
//! goes through a [`Transport`], which receives and returns the flat record
//! shapes of the server API.

use crate::error::ClientResult;
use async_trait::async_trait;
use netric_model::EntityDefinition;
use netric_query::QueryPayload;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A flat entity record: `field -> value` plus `<field>_fval` labels,
/// `id` and `obj_type`.
pub type EntityPayload = Map<String, Value>;

/// One page of query results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Matches across all pages.
    #[serde(default)]
    pub total_num: i64,
    #[serde(default)]
    pub offset: i64,
    /// Records in this page.
    #[serde(default)]
    pub num: i64,
    #[serde(default)]
    pub entities: Vec<EntityPayload>,
}

/// Server capabilities the client depends on.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Runs a query and returns one page of records.
    async fn execute(&self, query: &QueryPayload) -> ClientResult<ResultSet>;

    /// Fetches the field schema of an object type.
    async fn fetch_definition(&self, obj_type: &str) -> ClientResult<EntityDefinition>;

    /// Persists a record and returns it as stored (with its id).
    async fn save(&self, entity: &EntityPayload) -> ClientResult<EntityPayload>;
}

/// An in-memory server for tests and offline use.
pub mod mock {
    use super::*;
    use crate::error::ClientError;
    use netric_model::value::{id_from_value, same_key, value_key};
    use netric_query::{BooleanLogic, Condition, Direction, Operator};
    use std::cmp::Ordering;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering as AtomicOrdering};
    use tokio::sync::RwLock;

    /// Keeps definitions and records in memory and evaluates queries the
    /// way the server does: conditions left to right, no precedence.
    ///
    /// Supports the equality, substring and comparison operators; any other
    /// operator is rejected, as is a field the definition does not know.
    #[derive(Debug, Default)]
    pub struct MemoryTransport {
        definitions: RwLock<HashMap<String, EntityDefinition>>,
        records: RwLock<HashMap<String, Vec<EntityPayload>>>,
        next_id: AtomicU64,
        definition_fetches: AtomicUsize,
        executions: AtomicUsize,
    }

    impl MemoryTransport {
        pub fn new() -> Self {
            Self {
                next_id: AtomicU64::new(1),
                ..Self::default()
            }
        }

        /// Registers an object type.
        pub async fn add_definition(&self, definition: EntityDefinition) {
            self.definitions
                .write()
                .await
                .insert(definition.obj_type().to_string(), definition);
        }

        /// Stores a record as-is. Records without an id get one.
        pub async fn insert_record(&self, obj_type: &str, mut record: EntityPayload) -> String {
            let id = self.resolve_id(record.get("id"));
            record.insert("id".into(), Value::String(id.clone()));
            record.insert("obj_type".into(), Value::String(obj_type.to_string()));
            self.records
                .write()
                .await
                .entry(obj_type.to_string())
                .or_default()
                .push(record);
            id
        }

        /// Snapshot of the stored records of a type.
        pub async fn records(&self, obj_type: &str) -> Vec<EntityPayload> {
            self.records
                .read()
                .await
                .get(obj_type)
                .cloned()
                .unwrap_or_default()
        }

        /// How many times a definition was fetched.
        pub fn definition_fetches(&self) -> usize {
            self.definition_fetches.load(AtomicOrdering::SeqCst)
        }

        /// How many queries were executed.
        pub fn executions(&self) -> usize {
            self.executions.load(AtomicOrdering::SeqCst)
        }

        /// Keeps a given id, allocating one when absent. Numeric ids push
        /// the allocator past them so later records never collide.
        fn resolve_id(&self, given: Option<&Value>) -> String {
            match given.and_then(id_from_value) {
                Some(id) => {
                    if let Ok(n) = id.parse::<u64>() {
                        self.next_id.fetch_max(n.saturating_add(1), AtomicOrdering::SeqCst);
                    }
                    id
                }
                None => self.next_id.fetch_add(1, AtomicOrdering::SeqCst).to_string(),
            }
        }
    }

    #[async_trait]
    impl Transport for MemoryTransport {
        async fn execute(&self, query: &QueryPayload) -> ClientResult<ResultSet> {
            self.executions.fetch_add(1, AtomicOrdering::SeqCst);

            let definitions = self.definitions.read().await;
            let definition = definitions.get(&query.obj_type).ok_or_else(|| {
                ClientError::Rejected(format!("unknown object type: {}", query.obj_type))
            })?;
            for field in query
                .conditions
                .iter()
                .map(Condition::field_name)
                .chain(query.order_by.iter().map(|o| o.field_name.as_str()))
            {
                if !is_known_field(definition, field) {
                    return Err(ClientError::Rejected(format!(
                        "unknown field {field} on {}",
                        query.obj_type
                    )));
                }
            }

            let records = self.records.read().await;
            let mut matched = Vec::new();
            for record in records.get(&query.obj_type).into_iter().flatten() {
                if record_matches(record, &query.conditions)? {
                    matched.push(record.clone());
                }
            }

            matched.sort_by(|a, b| {
                query.order_by.iter().fold(Ordering::Equal, |acc, clause| {
                    acc.then_with(|| {
                        let ord = compare_values(
                            a.get(&clause.field_name).unwrap_or(&Value::Null),
                            b.get(&clause.field_name).unwrap_or(&Value::Null),
                        );
                        match clause.direction {
                            Direction::Asc => ord,
                            Direction::Desc => ord.reverse(),
                        }
                    })
                })
            });

            let total_num = matched.len() as i64;
            let offset = query.offset.max(0);
            let page: Vec<EntityPayload> = match query.limit {
                Some(limit) if limit > 0 => matched
                    .into_iter()
                    .skip(offset as usize)
                    .take(limit as usize)
                    .collect(),
                _ => matched.into_iter().skip(offset as usize).collect(),
            };

            Ok(ResultSet {
                total_num,
                offset,
                num: page.len() as i64,
                entities: page,
            })
        }

        async fn fetch_definition(&self, obj_type: &str) -> ClientResult<EntityDefinition> {
            self.definition_fetches.fetch_add(1, AtomicOrdering::SeqCst);
            self.definitions
                .read()
                .await
                .get(obj_type)
                .cloned()
                .ok_or_else(|| ClientError::DefinitionNotFound(obj_type.to_string()))
        }

        async fn save(&self, entity: &EntityPayload) -> ClientResult<EntityPayload> {
            let obj_type = entity
                .get("obj_type")
                .and_then(Value::as_str)
                .ok_or_else(|| ClientError::Rejected("record has no obj_type".into()))?
                .to_string();
            if !self.definitions.read().await.contains_key(&obj_type) {
                return Err(ClientError::Rejected(format!(
                    "unknown object type: {obj_type}"
                )));
            }

            let mut stored = entity.clone();
            let id = self.resolve_id(entity.get("id"));
            stored.insert("id".into(), Value::String(id.clone()));

            let mut records = self.records.write().await;
            let rows = records.entry(obj_type).or_default();
            let existing = rows.iter_mut().find(|row| {
                row.get("id")
                    .is_some_and(|row_id| same_key(row_id, &Value::String(id.clone())))
            });
            match existing {
                Some(row) => *row = stored.clone(),
                None => rows.push(stored.clone()),
            }
            Ok(stored)
        }
    }

    fn is_known_field(definition: &EntityDefinition, field: &str) -> bool {
        field == "id" || field == "obj_type" || definition.has_field(field)
    }

    fn record_matches(record: &EntityPayload, conditions: &[Condition]) -> ClientResult<bool> {
        let mut result = true;
        for (idx, cond) in conditions.iter().enumerate() {
            let hit = condition_matches(record, cond)?;
            result = if idx == 0 {
                hit
            } else {
                match cond.blogic() {
                    BooleanLogic::And => result && hit,
                    BooleanLogic::Or => result || hit,
                }
            };
        }
        Ok(result)
    }

    fn condition_matches(record: &EntityPayload, cond: &Condition) -> ClientResult<bool> {
        let actual = record.get(cond.field_name()).unwrap_or(&Value::Null);
        let expected = &cond.value;

        let hit = match cond.operator() {
            Operator::IsEqual => values_equal(actual, expected),
            Operator::IsNotEqual => !values_equal(actual, expected),
            Operator::Contains => match actual {
                Value::Array(items) => items.iter().any(|item| same_key(item, expected)),
                other => lowercase_key(other).contains(&lowercase_key(expected)),
            },
            Operator::BeginsWith => lowercase_key(actual).starts_with(&lowercase_key(expected)),
            Operator::IsGreater => compare_values(actual, expected) == Ordering::Greater,
            Operator::IsLess => compare_values(actual, expected) == Ordering::Less,
            Operator::IsGreaterOrEqual => compare_values(actual, expected) != Ordering::Less,
            Operator::IsLessOrEqual => compare_values(actual, expected) != Ordering::Greater,
            other => {
                return Err(ClientError::Rejected(format!("unsupported operator: {other}")));
            }
        };
        Ok(hit)
    }

    fn values_equal(actual: &Value, expected: &Value) -> bool {
        match (actual, expected) {
            (Value::Array(items), _) => items.iter().any(|item| same_key(item, expected)),
            (Value::Null, Value::Null) => true,
            (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
            _ => same_key(actual, expected),
        }
    }

    fn lowercase_key(value: &Value) -> String {
        value_key(value).to_lowercase()
    }

    fn compare_values(a: &Value, b: &Value) -> Ordering {
        match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => value_key(a).cmp(&value_key(b)),
        }
    }
}
