//! Error types for the query layer.

use thiserror::Error;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur in query operations.
///
/// Transport failures carry the adapter's human-readable message verbatim;
/// the engine does not distinguish 4xx from 5xx semantics.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The transport reported a failed request.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend payload did not have the expected envelope shape.
    #[error("malformed response envelope: {0}")]
    Envelope(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
