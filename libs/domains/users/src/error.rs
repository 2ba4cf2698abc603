use crate::access::AccessError;
use crate::service::Directory;
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_helpers::error_response;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// Missing from a role directory, including ids that belong to another role
    #[error("{label} not found: {1}", label = .0.label())]
    MemberNotFound(Directory, Uuid),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<validator::ValidationErrors> for UserError {
    fn from(errors: validator::ValidationErrors) -> Self {
        UserError::Validation(errors.to_string())
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match self {
            UserError::NotFound(_) => {
                error_response(StatusCode::NOT_FOUND, "not_found", "User not found")
            }
            UserError::MemberNotFound(directory, _) => error_response(
                StatusCode::NOT_FOUND,
                "not_found",
                format!("{} not found", directory.label()),
            ),
            UserError::DuplicateEmail(_) => error_response(
                StatusCode::BAD_REQUEST,
                "duplicate",
                "Email already registered",
            ),
            UserError::InvalidRole(_) => error_response(
                StatusCode::BAD_REQUEST,
                "invalid_role",
                "Invalid role. Must be one of: employee, trainer, manager, super-user",
            ),
            UserError::InvalidCredentials => {
                let mut response = error_response(
                    StatusCode::UNAUTHORIZED,
                    "invalid_credentials",
                    "Incorrect email or password",
                );
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                response
            }
            UserError::InvalidResetToken => error_response(
                StatusCode::BAD_REQUEST,
                "invalid_token",
                "Invalid or expired reset token",
            ),
            UserError::Validation(msg) => {
                error_response(StatusCode::BAD_REQUEST, "validation_error", msg)
            }
            UserError::Access(err) => err.into_response(),
            UserError::PasswordHash(msg) => {
                tracing::error!("Password hash error: {}", msg);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred",
                )
            }
            UserError::Internal(msg) => {
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
