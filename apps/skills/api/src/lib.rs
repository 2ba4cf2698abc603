//! Employee Skills Tracking API
//!
//! HTTP service for accounts, the skill catalog, trainer assessments,
//! learning paths and in-app notifications.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (JSON over HTTP, bearer tokens)
//! axum router (api/mod.rs) + identity layer
//!   ↓
//! domain services (users, skills, scores, learning, notifications)
//!   ↓
//! Postgres repositories, or in-memory when DATABASE_URL is unset
//! ```
//!
//! ## Modules
//!
//! - `config`: environment configuration
//! - `state`: service wiring for either backend
//! - `db`: Postgres connection and migrations
//! - `seed`: demo accounts and skills
//! - `api`: route composition, plus the caller-scoped notification routes
//! - `openapi`: the combined OpenAPI document

pub mod api;
pub mod config;
pub mod db;
pub mod openapi;
pub mod seed;
pub mod state;

use axum::Router;
use axum_helpers::{create_cors_layer, create_router, health_router};
use domain_learning::LearningRepository;
use domain_scores::ScoreRepository;
use domain_skills::SkillRepository;
use domain_users::UserRepository;

pub use config::Config;
pub use state::{AppState, Stores};

/// The complete application: API under `/api/v1`, Swagger UI, `/health`
/// and the banner at `/`.
pub fn build_app<U, K, S, L>(state: &AppState<U, K, S, L>, config: &Config) -> eyre::Result<Router>
where
    U: UserRepository + 'static,
    K: SkillRepository + 'static,
    S: ScoreRepository + 'static,
    L: LearningRepository + 'static,
{
    let cors = create_cors_layer(&[config.frontend_url.as_str()])?;

    Ok(create_router::<openapi::ApiDoc>(api::routes(state), cors)
        .merge(health_router(config.app))
        .merge(api::banner_router()))
}
