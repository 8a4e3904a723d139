//! Error types for the HTTP front-ends
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Failure reported by a key-value store backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached, or the connection broke mid-request
    #[error("Store unavailable: {0}")]
    Connection(String),

    /// The store was reached but rejected the command
    #[error("Store command failed: {0}")]
    Command(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
        {
            StoreError::Connection(err.to_string())
        } else {
            StoreError::Command(err.to_string())
        }
    }
}

// == App Error Enum ==
/// Error type returned by the HTTP handlers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Key absent from the store
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Store unreachable or failing
    #[error(transparent)]
    Store(#[from] StoreError),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::KeyNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Key not found" })),
            )
                .into_response(),
            AppError::Store(err) => {
                tracing::error!("Store request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the handlers.
pub type Result<T> = std::result::Result<T, AppError>;
