//! Error types for the todo API client.
//!
//! `NotFound` and `Validation` carry the server's `errorMessage`. Any other
//! non-success response lands in `HttpError` with the raw status and body.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested todo does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server rejected the payload with 400.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The server returned any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
