//! Error types for the store and the todo service.
//!
//! Validation and not-found failures are reported to the caller verbatim in
//! an `errorMessage` body. Store failures are logged and answered with a
//! generic 500 so storage details never leak into responses.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::ErrorResponse;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures of the underlying document collection.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored document exists but cannot be read back as a todo.
    #[error("corrupt document {}: {message}", .path.display())]
    Corrupt { path: PathBuf, message: String },
}

/// Errors surfaced by `TodoService` and the HTTP handlers.
#[derive(Error, Debug)]
pub enum TodoError {
    /// The request payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// No todo exists under the requested id.
    #[error("todo item does not exist")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TodoError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            TodoError::Validation(_) => StatusCode::BAD_REQUEST,
            TodoError::NotFound => StatusCode::NOT_FOUND,
            TodoError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match &self {
            TodoError::Store(err) => {
                tracing::error!(error = %err, "store operation failed");
                "internal server error".to_string()
            }
            other => {
                tracing::debug!(status = status.as_u16(), error = %other, "request rejected");
                other.to_string()
            }
        };
        (status, Json(ErrorResponse { error_message })).into_response()
    }
}
