use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        UnauthorizedResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::access::CurrentUser;
use crate::auth::Authenticator;
use crate::error::{UserError, UserResult};
use crate::models::{
    AccessToken, LoginRequest, LoginResponse, PasswordResetConfirm, PasswordResetRequest,
    RegisterUser, Role, UserResponse,
};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "auth";

#[derive(OpenApi)]
#[openapi(
    paths(register, login, me, request_password_reset, confirm_password_reset),
    components(
        schemas(
            RegisterUser,
            LoginRequest,
            LoginResponse,
            AccessToken,
            PasswordResetRequest,
            PasswordResetConfirm,
            UserResponse,
            Role
        ),
        responses(
            BadRequestValidationResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Registration, login and password reset")
    )
)]
pub struct AuthApiDoc;

/// Application state for auth handlers
pub struct AuthState<R: UserRepository> {
    pub users: Arc<UserService<R>>,
    pub auth: Authenticator<R>,
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            auth: self.auth.clone(),
        }
    }
}

pub fn auth_router<R: UserRepository + 'static>(
    users: Arc<UserService<R>>,
    auth: Authenticator<R>,
) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/password-reset", post(request_password_reset))
        .route("/password-reset/confirm", post(confirm_password_reset))
        .with_state(AuthState { users, auth })
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = TAG,
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(state): State<AuthState<R>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<RegisterUser>,
) -> UserResult<impl IntoResponse> {
    let user = state.users.register(input).await?;

    AuditEvent::new("auth.register", AuditOutcome::Success)
        .actor(user.id)
        .resource(format!("role:{}", user.role))
        .client(&headers)
        .log();

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<LoginResponse>> {
    let email = input.email.clone();

    match state.auth.login(input).await {
        Ok(response) => {
            AuditEvent::new("auth.login", AuditOutcome::Success)
                .actor(response.user.id)
                .client(&headers)
                .log();
            Ok(Json(response))
        }
        Err(e) => {
            if matches!(e, UserError::InvalidCredentials) {
                AuditEvent::new("auth.login", AuditOutcome::Failure)
                    .resource(format!("email:{}", email))
                    .client(&headers)
                    .log();
            }
            Err(e)
        }
    }
}

/// The authenticated caller
#[utoipa::path(
    get,
    path = "/me",
    tag = TAG,
    responses(
        (status = 200, description = "Current account", body = UserResponse),
        (status = 401, response = UnauthorizedResponse)
    ),
    security(("bearer" = []))
)]
async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}

/// Request a password reset e-mail
///
/// Always accepted, whether or not the address belongs to an account.
#[utoipa::path(
    post,
    path = "/password-reset",
    tag = TAG,
    request_body = PasswordResetRequest,
    responses(
        (status = 202, description = "Reset e-mail queued if the account exists"),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn request_password_reset<R: UserRepository>(
    State(state): State<AuthState<R>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<PasswordResetRequest>,
) -> UserResult<impl IntoResponse> {
    state.auth.request_password_reset(&input.email).await?;

    AuditEvent::new("auth.password_reset.request", AuditOutcome::Success)
        .resource(format!("email:{}", input.email))
        .client(&headers)
        .log();

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "message": "If the address is registered, a reset link has been sent"
        })),
    ))
}

/// Set a new password using a reset token
#[utoipa::path(
    post,
    path = "/password-reset/confirm",
    tag = TAG,
    request_body = PasswordResetConfirm,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn confirm_password_reset<R: UserRepository>(
    State(state): State<AuthState<R>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<PasswordResetConfirm>,
) -> UserResult<StatusCode> {
    let outcome = state.auth.reset_password(input).await;

    AuditEvent::new(
        "auth.password_reset.confirm",
        if outcome.is_ok() {
            AuditOutcome::Success
        } else {
            AuditOutcome::Failure
        },
    )
    .client(&headers)
    .log();

    outcome.map(|()| StatusCode::NO_CONTENT)
}
