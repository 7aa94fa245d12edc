//! Error types for the Flowbuilder client

use flowbuilder_artifacts::ArtifactError;
use flowbuilder_core::CoreError;
use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    /// Could not reach the backend (timeout, refused connection)
    #[error("Communication error: {0}")]
    Communication(String),

    /// Other transport failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Backend answered with a non-success status
    #[error("Request failed with status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Request payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Artifact packaging failed
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Domain model error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No collection is open in the builder
    #[error("No collection is currently open")]
    NoCurrentCollection,
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Serialization(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
