//! Client-side core for netric.
//!
//! Connects the query builder and the entity model to a remote server:
//!
//! - **Transport**: the async boundary to the server ([`Transport`]), plus an
//!   in-memory implementation in [`transport::mock`]
//! - **Definitions**: fetched once per object type and shared ([`DefinitionLoader`])
//! - **Collections**: a query and the page of entities it loaded ([`Collection`])
//! - **Client**: entity create/load/save on top of the above ([`Client`])
//! - **Events**: an owner-scoped publish/subscribe bus ([`EventBus`])
//!
//! # Example
//!
//! ```
//! use netric_client::transport::mock::MemoryTransport;
//! use netric_client::{Client, ClientConfig};
//! use std::sync::Arc;
//!
//! let client = Client::new(Arc::new(MemoryTransport::new()), ClientConfig::default());
//!
//! let mut customers = client.query("customer");
//! customers.query_mut().where_field("name").begins_with("Acme");
//! assert_eq!(customers.query().get_conditions().len(), 1);
//! ```

mod client;
mod collection;
mod config;
mod definitions;
mod error;
mod events;
pub mod transport;

pub use client::Client;
pub use collection::Collection;
pub use config::ClientConfig;
pub use definitions::DefinitionLoader;
pub use error::{ClientError, ClientResult};
pub use events::{ClientEvent, EventBus};
pub use transport::{EntityPayload, ResultSet, Transport};
