//! Error types for the notifications domain.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::error_response;
use thiserror::Error;
use uuid::Uuid;

/// Result type for notification operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

#[derive(Debug, Error)]
pub enum NotificationError {
    /// The e-mail provider refused or failed to deliver.
    #[error("Email provider error: {0}")]
    Provider(String),

    #[error("Template rendering error: {0}")]
    Template(String),

    #[error("Notification not found: {0}")]
    NotFound(Uuid),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<handlebars::RenderError> for NotificationError {
    fn from(err: handlebars::RenderError) -> Self {
        NotificationError::Template(err.to_string())
    }
}

impl From<handlebars::TemplateError> for NotificationError {
    fn from(err: handlebars::TemplateError) -> Self {
        NotificationError::Template(err.to_string())
    }
}

impl IntoResponse for NotificationError {
    fn into_response(self) -> Response {
        match self {
            NotificationError::NotFound(_) => {
                error_response(StatusCode::NOT_FOUND, "not_found", "Notification not found")
            }
            other => {
                tracing::error!("Internal error: {}", other);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred",
                )
            }
        }
    }
}
