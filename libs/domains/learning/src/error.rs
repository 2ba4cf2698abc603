use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::error_response;
use domain_users::AccessError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum LearningError {
    #[error("Learning path not found: {0}")]
    PathNotFound(Uuid),

    #[error("Learning step not found: {0}")]
    StepNotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type LearningResult<T> = Result<T, LearningError>;

impl From<validator::ValidationErrors> for LearningError {
    fn from(errors: validator::ValidationErrors) -> Self {
        LearningError::Validation(errors.to_string())
    }
}

impl IntoResponse for LearningError {
    fn into_response(self) -> Response {
        match self {
            LearningError::PathNotFound(_) => {
                error_response(StatusCode::NOT_FOUND, "not_found", "Learning path not found")
            }
            LearningError::StepNotFound(_) => {
                error_response(StatusCode::NOT_FOUND, "not_found", "Learning step not found")
            }
            LearningError::Validation(msg) => {
                error_response(StatusCode::BAD_REQUEST, "validation_error", msg)
            }
            LearningError::Access(err) => err.into_response(),
            LearningError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred",
                )
            }
        }
    }
}
