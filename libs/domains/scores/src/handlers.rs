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
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use domain_skills::SkillRepository;
use domain_users::{CurrentUser, RoleGroup, UserRepository};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ScoreResult;
use crate::models::{
    CreateScore, EmployeeAverage, EmployeeWithScores, Score, ScoreWithDetails, UpdateScore,
};
use crate::repository::ScoreRepository;
use crate::service::ScoreService;

const TAG: &str = "scores";

/// OpenAPI documentation for Scores API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_scores,
        create_score,
        get_score,
        update_score,
        delete_score,
        get_score_details,
        list_employee_scores,
        employee_average
    ),
    components(
        schemas(Score, CreateScore, UpdateScore, ScoreWithDetails, EmployeeAverage),
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
        (name = TAG, description = "Trainer assessments of employee skills")
    )
)]
pub struct ApiDoc;

/// Documentation for the score view mounted under the employee directory.
#[derive(OpenApi)]
#[openapi(
    paths(employee_with_scores),
    components(schemas(EmployeeWithScores)),
    tags(
        (name = "employees", description = "Employee directory")
    )
)]
pub struct EmployeeScoresApiDoc;

type SharedService<S, U, K> = Arc<ScoreService<S, U, K>>;

/// Trainers record and amend scores; managers and super-users read and
/// delete them.
pub fn router<S, U, K>(service: ScoreService<S, U, K>) -> Router
where
    S: ScoreRepository + 'static,
    U: UserRepository + 'static,
    K: SkillRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_scores).post(create_score))
        .route(
            "/{id}",
            get(get_score).put(update_score).delete(delete_score),
        )
        .route("/{id}/details", get(get_score_details))
        .route("/employee/{employee_id}", get(list_employee_scores))
        .route("/employee/{employee_id}/average", get(employee_average))
        .with_state(shared_service)
}

/// `/{id}/with-scores`, meant to be merged into the employee directory.
pub fn employee_scores_router<S, U, K>(service: ScoreService<S, U, K>) -> Router
where
    S: ScoreRepository + 'static,
    U: UserRepository + 'static,
    K: SkillRepository + 'static,
{
    Router::new()
        .route("/{id}/with-scores", get(employee_with_scores))
        .with_state(Arc::new(service))
}

/// List scores
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(Pagination),
    responses(
        (status = 200, description = "List of scores", body = Vec<Score>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn list_scores<S: ScoreRepository, U: UserRepository, K: SkillRepository>(
    State(service): State<SharedService<S, U, K>>,
    current: CurrentUser,
    page: Pagination,
) -> ScoreResult<Json<Vec<Score>>> {
    current.require(RoleGroup::ManagerOrSuperUser)?;
    Ok(Json(service.list(page).await?))
}

/// Record a score
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateScore,
    responses(
        (status = 201, description = "Score recorded", body = Score),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn create_score<S: ScoreRepository, U: UserRepository, K: SkillRepository>(
    State(service): State<SharedService<S, U, K>>,
    current: CurrentUser,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateScore>,
) -> ScoreResult<impl IntoResponse> {
    current.require(RoleGroup::TrainerOnly)?;

    let score = service.create(input).await?;

    AuditEvent::new("score.create", AuditOutcome::Success)
        .actor(current.0.id)
        .resource(format!("score:{}", score.id))
        .client(&headers)
        .log();

    Ok((StatusCode::CREATED, Json(score)))
}

/// Get a score by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Score ID")
    ),
    responses(
        (status = 200, description = "Score found", body = Score),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn get_score<S: ScoreRepository, U: UserRepository, K: SkillRepository>(
    State(service): State<SharedService<S, U, K>>,
    current: CurrentUser,
    UuidPath(id): UuidPath,
) -> ScoreResult<Json<Score>> {
    current.require(RoleGroup::ManagerOrSuperUser)?;
    Ok(Json(service.get(id).await?))
}

/// Update a score
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Score ID")
    ),
    request_body = UpdateScore,
    responses(
        (status = 200, description = "Score updated", body = Score),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn update_score<S: ScoreRepository, U: UserRepository, K: SkillRepository>(
    State(service): State<SharedService<S, U, K>>,
    current: CurrentUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateScore>,
) -> ScoreResult<Json<Score>> {
    current.require(RoleGroup::TrainerOnly)?;
    Ok(Json(service.update(id, input).await?))
}

/// Delete a score
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Score ID")
    ),
    responses(
        (status = 204, description = "Score deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn delete_score<S: ScoreRepository, U: UserRepository, K: SkillRepository>(
    State(service): State<SharedService<S, U, K>>,
    current: CurrentUser,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> ScoreResult<StatusCode> {
    current.require(RoleGroup::ManagerOrSuperUser)?;

    service.delete(id).await?;

    AuditEvent::new("score.delete", AuditOutcome::Success)
        .actor(current.0.id)
        .resource(format!("score:{}", id))
        .client(&headers)
        .log();

    Ok(StatusCode::NO_CONTENT)
}

/// Get a score with skill, trainer and employee names
#[utoipa::path(
    get,
    path = "/{id}/details",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Score ID")
    ),
    responses(
        (status = 200, description = "Score with names", body = ScoreWithDetails),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn get_score_details<S: ScoreRepository, U: UserRepository, K: SkillRepository>(
    State(service): State<SharedService<S, U, K>>,
    current: CurrentUser,
    UuidPath(id): UuidPath,
) -> ScoreResult<Json<ScoreWithDetails>> {
    current.require(RoleGroup::ManagerOrSuperUser)?;
    Ok(Json(service.get_with_details(id).await?))
}

/// List all scores of one employee
#[utoipa::path(
    get,
    path = "/employee/{employee_id}",
    tag = TAG,
    params(
        ("employee_id" = Uuid, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Scores of the employee", body = Vec<Score>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn list_employee_scores<S: ScoreRepository, U: UserRepository, K: SkillRepository>(
    State(service): State<SharedService<S, U, K>>,
    current: CurrentUser,
    UuidPath(employee_id): UuidPath,
) -> ScoreResult<Json<Vec<Score>>> {
    current.require(RoleGroup::ManagerOrSuperUser)?;
    Ok(Json(service.list_by_employee(employee_id).await?))
}

/// Average score of one employee
#[utoipa::path(
    get,
    path = "/employee/{employee_id}/average",
    tag = TAG,
    params(
        ("employee_id" = Uuid, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Mean of the employee's scores", body = EmployeeAverage),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, description = "No scores found for employee"),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn employee_average<S: ScoreRepository, U: UserRepository, K: SkillRepository>(
    State(service): State<SharedService<S, U, K>>,
    current: CurrentUser,
    UuidPath(employee_id): UuidPath,
) -> ScoreResult<Json<EmployeeAverage>> {
    current.require(RoleGroup::ManagerOrSuperUser)?;
    Ok(Json(service.average_for_employee(employee_id).await?))
}

/// Employee profile with all of their scores
#[utoipa::path(
    get,
    path = "/{id}/with-scores",
    tag = "employees",
    params(
        ("id" = Uuid, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee with scores", body = EmployeeWithScores),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn employee_with_scores<S: ScoreRepository, U: UserRepository, K: SkillRepository>(
    State(service): State<SharedService<S, U, K>>,
    current: CurrentUser,
    UuidPath(id): UuidPath,
) -> ScoreResult<Json<EmployeeWithScores>> {
    current.require(RoleGroup::ManagerOrSuperUser)?;
    Ok(Json(service.employee_with_scores(id).await?))
}
