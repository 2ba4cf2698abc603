pub mod notifications;

use axum::{Json, Router, routing::get};
use domain_learning::LearningRepository;
use domain_scores::{ScoreRepository, employee_scores_router};
use domain_skills::SkillRepository;
use domain_users::{Directory, UserRepository, auth_router, directory_router, with_identity};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::state::AppState;

/// Creates the API routes without the `/api/v1` prefix, which
/// `create_router` adds.
///
/// Every sub-router has its state applied; the identity layer wraps them
/// all so each handler sees the caller resolved from the bearer token.
pub fn routes<U, K, S, L>(state: &AppState<U, K, S, L>) -> Router
where
    U: UserRepository + 'static,
    K: SkillRepository + 'static,
    S: ScoreRepository + 'static,
    L: LearningRepository + 'static,
{
    let users = Arc::new(state.users.clone());

    let employees = directory_router(users.clone(), Directory::Employees)
        .merge(employee_scores_router(state.scores.clone()));

    let api = Router::new()
        .nest("/auth", auth_router(users.clone(), state.auth.clone()))
        .nest("/employees", employees)
        .nest("/trainers", directory_router(users.clone(), Directory::Trainers))
        .nest("/managers", directory_router(users, Directory::Managers))
        .nest("/skills", domain_skills::handlers::router(state.skills.clone()))
        .nest("/scores", domain_scores::handlers::router(state.scores.clone()))
        .nest(
            "/learning-paths",
            domain_learning::handlers::router(state.learning.clone()),
        )
        .nest("/notifications", notifications::router(state.inbox.clone()));

    with_identity(api, state.auth.clone())
}

async fn banner() -> Json<Value> {
    Json(json!({
        "message": "Employee Skills Tracking API",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/swagger-ui"
    }))
}

/// `GET /` service banner.
pub fn banner_router() -> Router {
    Router::new().route("/", get(banner))
}
