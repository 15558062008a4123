//! Error types for the client layer.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the server.
///
/// The query builder and entity model never produce these: bad field names
/// and operators only surface here, as [`ClientError::Rejected`], once the
/// server has seen them.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport failed to deliver the request.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server refused the request (unknown field, operator or type).
    #[error("rejected by server: {0}")]
    Rejected(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed payload.
    #[error("payload error: {0}")]
    Payload(#[from] netric_types::Error),

    /// No definition exists for the object type.
    #[error("definition not found: {0}")]
    DefinitionNotFound(String),

    /// No entity with this id.
    #[error("entity not found: {obj_type}:{id}")]
    NotFound { obj_type: String, id: String },

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}
