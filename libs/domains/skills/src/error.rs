use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::error_response;
use domain_users::AccessError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SkillError {
    #[error("Skill not found: {0}")]
    NotFound(Uuid),

    #[error("Skill with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type SkillResult<T> = Result<T, SkillError>;

impl From<validator::ValidationErrors> for SkillError {
    fn from(errors: validator::ValidationErrors) -> Self {
        SkillError::Validation(errors.to_string())
    }
}

impl IntoResponse for SkillError {
    fn into_response(self) -> Response {
        match self {
            SkillError::NotFound(_) => {
                error_response(StatusCode::NOT_FOUND, "not_found", "Skill not found")
            }
            SkillError::DuplicateName(name) => error_response(
                StatusCode::BAD_REQUEST,
                "duplicate",
                format!("Skill with name '{}' already exists", name),
            ),
            SkillError::Validation(msg) => {
                error_response(StatusCode::BAD_REQUEST, "validation_error", msg)
            }
            SkillError::Access(err) => err.into_response(),
            SkillError::Internal(msg) => {
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
