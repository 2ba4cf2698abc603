//! Scores Domain
//!
//! Numeric assessments trainers give employees on skills, with the
//! per-employee average and a "details" view that resolves the referenced
//! names. Scores keep plain ids, so a referenced record may be gone; reads
//! tolerate that.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ScoreError, ScoreResult};
pub use handlers::{ApiDoc, EmployeeScoresApiDoc, employee_scores_router};
pub use models::{
    CreateScore, EmployeeAverage, EmployeeWithScores, Score, ScoreWithDetails, UpdateScore,
};
pub use postgres::PostgresScoreRepository;
pub use repository::{InMemoryScoreRepository, ScoreRepository};
pub use service::ScoreService;
