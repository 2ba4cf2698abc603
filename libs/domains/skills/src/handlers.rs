use axum::{
    Json, Router,
    extract::{Path, State},
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
use domain_users::{CurrentUser, RoleGroup};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::SkillResult;
use crate::models::{CreateSkill, Skill, UpdateSkill};
use crate::repository::SkillRepository;
use crate::service::SkillService;

const TAG: &str = "skills";

/// OpenAPI documentation for Skills API
#[derive(OpenApi)]
#[openapi(
    paths(list_skills, create_skill, get_skill, update_skill, delete_skill, list_by_category),
    components(
        schemas(Skill, CreateSkill, UpdateSkill),
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
        (name = TAG, description = "Skill catalog")
    )
)]
pub struct ApiDoc;

/// Reads are public; writes need a manager or super-user.
pub fn router<R: SkillRepository + 'static>(service: SkillService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_skills).post(create_skill))
        .route(
            "/{id}",
            get(get_skill).put(update_skill).delete(delete_skill),
        )
        .route("/category/{category}", get(list_by_category))
        .with_state(shared_service)
}

/// List skills
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(Pagination),
    responses(
        (status = 200, description = "List of skills", body = Vec<Skill>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_skills<R: SkillRepository>(
    State(service): State<Arc<SkillService<R>>>,
    page: Pagination,
) -> SkillResult<Json<Vec<Skill>>> {
    Ok(Json(service.list(page).await?))
}

/// Create a new skill
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateSkill,
    responses(
        (status = 201, description = "Skill created successfully", body = Skill),
        (status = 400, response = ConflictResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn create_skill<R: SkillRepository>(
    State(service): State<Arc<SkillService<R>>>,
    current: CurrentUser,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateSkill>,
) -> SkillResult<impl IntoResponse> {
    current.require(RoleGroup::ManagerOrSuperUser)?;

    let skill = service.create(input).await?;

    AuditEvent::new("skill.create", AuditOutcome::Success)
        .actor(current.0.id)
        .resource(format!("skill:{}", skill.id))
        .client(&headers)
        .log();

    Ok((StatusCode::CREATED, Json(skill)))
}

/// Get a skill by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Skill ID")
    ),
    responses(
        (status = 200, description = "Skill found", body = Skill),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_skill<R: SkillRepository>(
    State(service): State<Arc<SkillService<R>>>,
    UuidPath(id): UuidPath,
) -> SkillResult<Json<Skill>> {
    Ok(Json(service.get(id).await?))
}

/// Update a skill
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Skill ID")
    ),
    request_body = UpdateSkill,
    responses(
        (status = 200, description = "Skill updated successfully", body = Skill),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn update_skill<R: SkillRepository>(
    State(service): State<Arc<SkillService<R>>>,
    current: CurrentUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateSkill>,
) -> SkillResult<Json<Skill>> {
    current.require(RoleGroup::ManagerOrSuperUser)?;
    Ok(Json(service.update(id, input).await?))
}

/// Delete a skill
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Skill ID")
    ),
    responses(
        (status = 204, description = "Skill deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn delete_skill<R: SkillRepository>(
    State(service): State<Arc<SkillService<R>>>,
    current: CurrentUser,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> SkillResult<StatusCode> {
    current.require(RoleGroup::ManagerOrSuperUser)?;

    service.delete(id).await?;

    AuditEvent::new("skill.delete", AuditOutcome::Success)
        .actor(current.0.id)
        .resource(format!("skill:{}", id))
        .client(&headers)
        .log();

    Ok(StatusCode::NO_CONTENT)
}

/// List skills in one category (exact match)
#[utoipa::path(
    get,
    path = "/category/{category}",
    tag = TAG,
    params(
        ("category" = String, Path, description = "Category name")
    ),
    responses(
        (status = 200, description = "Skills in the category", body = Vec<Skill>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_category<R: SkillRepository>(
    State(service): State<Arc<SkillService<R>>>,
    Path(category): Path<String>,
) -> SkillResult<Json<Vec<Skill>>> {
    Ok(Json(service.list_by_category(&category).await?))
}
