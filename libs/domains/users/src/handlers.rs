use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, Pagination, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::access::{AccessError, CurrentUser};
use crate::error::UserResult;
use crate::models::{CreateMember, UpdateProfile, UserResponse};
use crate::repository::UserRepository;
use crate::service::{Directory, UserService};

const TAG: &str = "directories";

/// OpenAPI documentation shared by the employee, trainer and manager
/// directories
#[derive(OpenApi)]
#[openapi(
    paths(list_members, create_member, get_member, update_member, delete_member, my_profile),
    components(
        schemas(UserResponse, CreateMember, UpdateProfile),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Role-filtered account directories")
    )
)]
pub struct ApiDoc;

pub struct DirectoryState<R: UserRepository> {
    service: Arc<UserService<R>>,
    directory: Directory,
}

impl<R: UserRepository> Clone for DirectoryState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            directory: self.directory,
        }
    }
}

/// Router for one directory: CRUD restricted to the directory's role, plus
/// `/me/profile` for directories with a self-service group.
pub fn directory_router<R: UserRepository + 'static>(
    service: Arc<UserService<R>>,
    directory: Directory,
) -> Router {
    let mut router = Router::new()
        .route("/", get(list_members).post(create_member))
        .route(
            "/{id}",
            get(get_member).put(update_member).delete(delete_member),
        );

    if directory.self_group().is_some() {
        router = router.route("/me/profile", get(my_profile));
    }

    router.with_state(DirectoryState { service, directory })
}

/// List accounts in the directory
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(Pagination),
    responses(
        (status = 200, description = "Accounts holding the directory's role", body = Vec<UserResponse>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn list_members<R: UserRepository>(
    State(state): State<DirectoryState<R>>,
    current: CurrentUser,
    page: Pagination,
) -> UserResult<Json<Vec<UserResponse>>> {
    current.require(state.directory.admin_group())?;

    let users = state.service.directory(state.directory).list(page).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create an account with the directory's role
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateMember,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, response = ConflictResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn create_member<R: UserRepository>(
    State(state): State<DirectoryState<R>>,
    current: CurrentUser,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateMember>,
) -> UserResult<impl IntoResponse> {
    current.require(state.directory.admin_group())?;

    let user = state.service.directory(state.directory).create(input).await?;

    AuditEvent::new("user.create", AuditOutcome::Success)
        .actor(current.0.id)
        .resource(format!("user:{}", user.id))
        .client(&headers)
        .log();

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get an account by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account found", body = UserResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn get_member<R: UserRepository>(
    State(state): State<DirectoryState<R>>,
    current: CurrentUser,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserResponse>> {
    current.require(state.directory.admin_group())?;

    let user = state.service.directory(state.directory).get(id).await?;
    Ok(Json(user.into()))
}

/// Update profile fields of an account
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Account updated", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn update_member<R: UserRepository>(
    State(state): State<DirectoryState<R>>,
    current: CurrentUser,
    UuidPath(id): UuidPath,
    ValidatedJson(patch): ValidatedJson<UpdateProfile>,
) -> UserResult<Json<UserResponse>> {
    current.require(state.directory.admin_group())?;

    let user = state
        .service
        .directory(state.directory)
        .update(id, patch)
        .await?;
    Ok(Json(user.into()))
}

/// Delete an account
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn delete_member<R: UserRepository>(
    State(state): State<DirectoryState<R>>,
    current: CurrentUser,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> UserResult<StatusCode> {
    current.require(state.directory.admin_group())?;

    state.service.directory(state.directory).delete(id).await?;

    AuditEvent::new("user.delete", AuditOutcome::Success)
        .actor(current.0.id)
        .resource(format!("user:{}", id))
        .client(&headers)
        .log();

    Ok(StatusCode::NO_CONTENT)
}

/// The caller's own profile
#[utoipa::path(
    get,
    path = "/me/profile",
    tag = TAG,
    responses(
        (status = 200, description = "Caller's profile", body = UserResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse)
    ),
    security(("bearer" = []))
)]
async fn my_profile<R: UserRepository>(
    State(state): State<DirectoryState<R>>,
    current: CurrentUser,
) -> UserResult<Json<UserResponse>> {
    let group = state.directory.self_group().ok_or(AccessError::Forbidden)?;
    let user = current.require(group)?;
    Ok(Json(user.clone().into()))
}
