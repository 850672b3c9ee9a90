//! Error types for the furniture inventory
//!
//! All errors use thiserror for structured error handling.
//! Each variant maps onto an HTTP response at the route boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Message returned when a required form field is missing.
pub const MISSING_FIELDS_MESSAGE: &str = "All fields (except notes) are required.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Item not found: {0}")]
    NotFound(u64),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Photo not found: {0}")]
    PhotoNotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Status code and caller-visible message for this error
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(_) => (StatusCode::BAD_REQUEST, "Invalid item ID.".to_string()),
            AppError::UnsupportedFileType(_) => {
                (StatusCode::BAD_REQUEST, "Invalid file type.".to_string())
            }
            AppError::PhotoNotFound(_) => (StatusCode::NOT_FOUND, "File not found.".to_string()),
            AppError::Persistence(_)
            | AppError::Io(_)
            | AppError::Serialization(_)
            | AppError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error.".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, message).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
