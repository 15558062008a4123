//! The query builder and its transport payload.

use crate::condition::{BooleanLogic, Condition, ConditionBuilder};
use crate::order::{Direction, OrderBy};
use serde::{Deserialize, Serialize};

/// Flat, transport-bound form of a [`Query`].
///
/// Field order is fixed, so the serialized form doubles as a cache key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPayload {
    pub obj_type: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub order_by: Vec<OrderBy>,
    /// `None` leaves the page size to the server.
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: i64,
}

impl QueryPayload {
    /// Parses a payload from JSON.
    pub fn from_json(json: &str) -> netric_types::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the payload to JSON.
    pub fn to_json(&self) -> netric_types::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A filtered, ordered, paged search against one object type.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    obj_type: String,
    conditions: Vec<Condition>,
    order_by: Vec<OrderBy>,
    limit: Option<i64>,
    offset: i64,
}

impl Query {
    /// Creates an empty query for `obj_type`.
    pub fn new(obj_type: impl Into<String>) -> Self {
        Self {
            obj_type: obj_type.into(),
            conditions: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: 0,
        }
    }

    /// Rebuilds a query from its payload.
    pub fn from_data(data: QueryPayload) -> Self {
        Self {
            obj_type: data.obj_type,
            conditions: data.conditions,
            order_by: data.order_by,
            limit: data.limit,
            offset: data.offset,
        }
    }

    pub fn obj_type(&self) -> &str {
        &self.obj_type
    }

    // ── Conditions ───────────────────────────────────────────────

    /// Starts a condition joined with `and`.
    pub fn where_field(&mut self, field_name: impl Into<String>) -> ConditionBuilder<'_> {
        self.push_condition(field_name.into(), BooleanLogic::And)
    }

    /// Appends a condition joined with `and`.
    pub fn and_where(&mut self, field_name: impl Into<String>) -> ConditionBuilder<'_> {
        self.push_condition(field_name.into(), BooleanLogic::And)
    }

    /// Appends a condition joined with `or`.
    pub fn or_where(&mut self, field_name: impl Into<String>) -> ConditionBuilder<'_> {
        self.push_condition(field_name.into(), BooleanLogic::Or)
    }

    fn push_condition(&mut self, field_name: String, blogic: BooleanLogic) -> ConditionBuilder<'_> {
        self.conditions.push(Condition::new(field_name, blogic));
        let idx = self.conditions.len() - 1;
        ConditionBuilder::new(&mut self.conditions[idx])
    }

    pub fn get_conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Mutable view of the conditions, for editing values in place.
    pub fn get_conditions_mut(&mut self) -> &mut [Condition] {
        &mut self.conditions
    }

    pub fn clear_conditions(&mut self) {
        self.conditions.clear();
    }

    // ── Ordering ─────────────────────────────────────────────────

    /// Appends an order-by clause. The same field may appear more than once.
    pub fn set_order_by(&mut self, field_name: impl Into<String>, direction: Direction) {
        self.order_by.push(OrderBy::new(field_name, direction));
    }

    pub fn get_order_by(&self) -> &[OrderBy] {
        &self.order_by
    }

    pub fn clear_order_by(&mut self) {
        self.order_by.clear();
    }

    // ── Paging ───────────────────────────────────────────────────
    //
    // No range checks: the server decides what a negative or zero value means.

    pub fn set_limit(&mut self, limit: i64) {
        self.limit = Some(limit);
    }

    pub fn get_limit(&self) -> Option<i64> {
        self.limit
    }

    pub fn set_offset(&mut self, offset: i64) {
        self.offset = offset;
    }

    pub fn get_offset(&self) -> i64 {
        self.offset
    }

    // ── Serialization ────────────────────────────────────────────

    /// Flattens the query into its transport payload.
    pub fn query_to_data(&self) -> QueryPayload {
        QueryPayload {
            obj_type: self.obj_type.clone(),
            conditions: self.conditions.clone(),
            order_by: self.order_by.clone(),
            limit: self.limit,
            offset: self.offset,
        }
    }

    /// Canonical JSON of the payload. Queries with the same logical
    /// content produce the same key.
    pub fn cache_key(&self) -> netric_types::Result<String> {
        self.query_to_data().to_json()
    }
}

impl From<QueryPayload> for Query {
    fn from(data: QueryPayload) -> Self {
        Self::from_data(data)
    }
}
