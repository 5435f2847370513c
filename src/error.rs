//! Application error taxonomy
//!
//! `NotFound` and `Validation` are expected, recoverable-by-caller conditions
//! and surface with a precise message. Gateway failures are logged with full
//! detail and reach the caller as a generic message only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::ApiResponse;
use crate::storage::StorageError;
use crate::validation::ValidationError;
use crate::workflow::WorkflowError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("storage error")]
    Storage(#[source] std::io::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidFilename => Self::validation("Invalid filename"),
            StorageError::Io(io) => Self::Storage(io),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::Storage(err) => {
                tracing::error!("Storage error: {} (kind: {:?})", err, err.kind());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to store file".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_errors_keep_their_message() {
        let err = AppError::validation("rejection reason required");
        assert_eq!(err.to_string(), "rejection reason required");

        let err = AppError::NotFound("Application");
        assert_eq!(err.to_string(), "Application not found");
    }

    #[test]
    fn upstream_errors_surface_generically() {
        let err = AppError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.to_string(), "database error");
    }
}
