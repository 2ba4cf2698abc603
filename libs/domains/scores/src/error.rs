use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::error_response;
use domain_skills::SkillError;
use domain_users::{AccessError, UserError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Score not found: {0}")]
    NotFound(Uuid),

    #[error("No scores found for employee {0}")]
    NoScores(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Skill(#[from] SkillError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ScoreResult<T> = Result<T, ScoreError>;

impl From<validator::ValidationErrors> for ScoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ScoreError::Validation(errors.to_string())
    }
}

impl IntoResponse for ScoreError {
    fn into_response(self) -> Response {
        match self {
            ScoreError::NotFound(_) => {
                error_response(StatusCode::NOT_FOUND, "not_found", "Score not found")
            }
            ScoreError::NoScores(_) => error_response(
                StatusCode::NOT_FOUND,
                "not_found",
                "No scores found for employee",
            ),
            ScoreError::Validation(msg) => {
                error_response(StatusCode::BAD_REQUEST, "validation_error", msg)
            }
            ScoreError::Access(err) => err.into_response(),
            ScoreError::User(err) => err.into_response(),
            ScoreError::Skill(err) => err.into_response(),
            ScoreError::Internal(msg) => {
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
