//! Entity query builder for netric.
//!
//! A [`Query`] is a serializable description of a search against one object
//! type: filter conditions joined with boolean logic, ordering and paging.
//!
//! The builder checks shape, not meaning. Unknown field names and operators
//! are accepted as-is; the server is the authority that rejects them when
//! the query is executed.
//!
//! ```
//! use netric_query::{Direction, Query};
//!
//! let mut query = Query::new("customer");
//! query.where_field("type_id").equal_to(2);
//! query.or_where("name").contains("acme");
//! query.set_order_by("name", Direction::Asc);
//! query.set_limit(50);
//!
//! let payload = query.query_to_data();
//! assert_eq!(payload.conditions.len(), 2);
//! ```

mod condition;
mod order;
mod query;

pub use condition::{BooleanLogic, Condition, ConditionBuilder, Operator};
pub use order::{Direction, OrderBy};
pub use query::{Query, QueryPayload};
