//! Core type definitions for the netric client.
//!
//! This crate defines the small, dependency-light primitives shared by the
//! query builder, the entity model and the client:
//! - Object references and their `type:id:label` token codec
//! - The common error type for payload (de)serialization
//!
//! Anything that knows about a particular object type (fields, groupings,
//! views) belongs in `netric-model`, not here.

mod objref;

pub use objref::{OBJ_REF_SEPARATOR, ObjRef, decode_obj_ref, encode_obj_ref};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while moving payloads across the transport boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}
