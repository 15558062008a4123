//! Result ordering.

use serde::{Deserialize, Serialize};

/// Sort direction of an order-by clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    #[serde(alias = "ASC")]
    Asc,
    #[serde(alias = "DESC")]
    Desc,
}

/// One order-by clause. Clauses apply left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field_name: String,
    #[serde(rename = "order", default)]
    pub direction: Direction,
}

impl OrderBy {
    pub fn new(field_name: impl Into<String>, direction: Direction) -> Self {
        Self {
            field_name: field_name.into(),
            direction,
        }
    }
}
