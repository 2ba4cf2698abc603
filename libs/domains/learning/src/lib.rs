//! Learning Domain
//!
//! Learning paths assigned to employees, each an ordered list of steps that
//! can be marked complete. Progress is the completed share of the steps.
//!
//! Managers and super-users assign paths and add steps; the employee a path
//! belongs to can read it and update its steps.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{LearningError, LearningResult};
pub use handlers::ApiDoc;
pub use models::{
    AssignLearningPath, CreateLearningStep, LearningPath, LearningPathWithSteps, LearningStep,
    NewLearningPath, UpdateLearningStep,
};
pub use postgres::PostgresLearningRepository;
pub use repository::{InMemoryLearningRepository, LearningRepository};
pub use service::LearningService;
