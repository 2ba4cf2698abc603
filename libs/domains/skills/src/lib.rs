//! Skills Domain
//!
//! The catalog of skills employees are scored on. Names are unique; the
//! category is free text and can be listed by exact match.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_skills::{InMemorySkillRepository, SkillService, handlers};
//!
//! let service = SkillService::new(Arc::new(InMemorySkillRepository::new()));
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{SkillError, SkillResult};
pub use handlers::ApiDoc;
pub use models::{CreateSkill, Skill, UpdateSkill};
pub use postgres::PostgresSkillRepository;
pub use repository::{InMemorySkillRepository, SkillRepository};
pub use service::SkillService;
