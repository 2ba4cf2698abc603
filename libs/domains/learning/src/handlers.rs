use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use domain_users::{CurrentUser, RoleGroup};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::LearningResult;
use crate::models::{
    CreateLearningStep, LearningPath, LearningPathWithSteps, LearningStep, NewLearningPath,
    UpdateLearningStep,
};
use crate::repository::LearningRepository;
use crate::service::LearningService;

const TAG: &str = "learning-paths";

/// OpenAPI documentation for Learning Paths API
#[derive(OpenApi)]
#[openapi(
    paths(
        assign_path,
        my_paths,
        employee_paths,
        get_path,
        add_step,
        list_steps,
        update_step
    ),
    components(
        schemas(
            LearningPath,
            NewLearningPath,
            LearningStep,
            CreateLearningStep,
            UpdateLearningStep,
            LearningPathWithSteps
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Learning paths assigned to employees")
    )
)]
pub struct ApiDoc;

type SharedService<R> = Arc<LearningService<R>>;

/// Managers and super-users assign paths and author steps. The assigned
/// employee reads their own paths and ticks steps off.
pub fn router<R: LearningRepository + 'static>(service: LearningService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(assign_path))
        .route("/me", get(my_paths))
        .route("/employee/{employee_id}", get(employee_paths))
        .route("/{id}", get(get_path))
        .route("/{id}/steps", get(list_steps).post(add_step))
        .route("/steps/{step_id}", put(update_step))
        .with_state(shared_service)
}

/// Assign a learning path
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = NewLearningPath,
    responses(
        (status = 201, description = "Path assigned", body = LearningPath),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn assign_path<R: LearningRepository>(
    State(service): State<SharedService<R>>,
    current: CurrentUser,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<NewLearningPath>,
) -> LearningResult<impl IntoResponse> {
    let assigner = current.require(RoleGroup::ManagerOrSuperUser)?.id;

    let path = service.assign_path(input.assigned_by(assigner)).await?;

    AuditEvent::new("learning_path.assign", AuditOutcome::Success)
        .actor(assigner)
        .resource(format!("learning_path:{}", path.id))
        .client(&headers)
        .log();

    Ok((StatusCode::CREATED, Json(path)))
}

/// The caller's own learning paths
#[utoipa::path(
    get,
    path = "/me",
    tag = TAG,
    responses(
        (status = 200, description = "Paths assigned to the caller", body = Vec<LearningPath>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn my_paths<R: LearningRepository>(
    State(service): State<SharedService<R>>,
    current: CurrentUser,
) -> LearningResult<Json<Vec<LearningPath>>> {
    let me = current.require(RoleGroup::EmployeeOnly)?;
    Ok(Json(service.list_paths_for_employee(me.id).await?))
}

/// Learning paths of one employee
#[utoipa::path(
    get,
    path = "/employee/{employee_id}",
    tag = TAG,
    params(
        ("employee_id" = Uuid, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Paths assigned to the employee", body = Vec<LearningPath>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn employee_paths<R: LearningRepository>(
    State(service): State<SharedService<R>>,
    current: CurrentUser,
    UuidPath(employee_id): UuidPath,
) -> LearningResult<Json<Vec<LearningPath>>> {
    current.require_self_or(employee_id, RoleGroup::ManagerOrSuperUser)?;
    Ok(Json(service.list_paths_for_employee(employee_id).await?))
}

/// Get a learning path with its steps and progress
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Learning path ID")
    ),
    responses(
        (status = 200, description = "Path with steps", body = LearningPathWithSteps),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn get_path<R: LearningRepository>(
    State(service): State<SharedService<R>>,
    current: CurrentUser,
    UuidPath(id): UuidPath,
) -> LearningResult<Json<LearningPathWithSteps>> {
    let view = service.path_with_steps(id).await?;
    current.require_self_or(view.path.employee_id, RoleGroup::ManagerOrSuperUser)?;
    Ok(Json(view))
}

/// Add a step to a learning path
#[utoipa::path(
    post,
    path = "/{id}/steps",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Learning path ID")
    ),
    request_body = CreateLearningStep,
    responses(
        (status = 201, description = "Step added", body = LearningStep),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn add_step<R: LearningRepository>(
    State(service): State<SharedService<R>>,
    current: CurrentUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateLearningStep>,
) -> LearningResult<impl IntoResponse> {
    current.require(RoleGroup::ManagerOrSuperUser)?;
    let step = service.add_step(id, input).await?;
    Ok((StatusCode::CREATED, Json(step)))
}

/// List the steps of a learning path
#[utoipa::path(
    get,
    path = "/{id}/steps",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Learning path ID")
    ),
    responses(
        (status = 200, description = "Steps in order", body = Vec<LearningStep>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn list_steps<R: LearningRepository>(
    State(service): State<SharedService<R>>,
    current: CurrentUser,
    UuidPath(id): UuidPath,
) -> LearningResult<Json<Vec<LearningStep>>> {
    let path = service.get_path(id).await?;
    current.require_self_or(path.employee_id, RoleGroup::ManagerOrSuperUser)?;
    Ok(Json(service.list_steps(id).await?))
}

/// Update a step, e.g. mark it complete
#[utoipa::path(
    put,
    path = "/steps/{step_id}",
    tag = TAG,
    params(
        ("step_id" = Uuid, Path, description = "Learning step ID")
    ),
    request_body = UpdateLearningStep,
    responses(
        (status = 200, description = "Step updated", body = LearningStep),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn update_step<R: LearningRepository>(
    State(service): State<SharedService<R>>,
    current: CurrentUser,
    UuidPath(step_id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateLearningStep>,
) -> LearningResult<Json<LearningStep>> {
    let path = service.path_for_step(step_id).await?;
    current.require_self_or(path.employee_id, RoleGroup::ManagerOrSuperUser)?;
    Ok(Json(service.update_step(step_id, input).await?))
}
