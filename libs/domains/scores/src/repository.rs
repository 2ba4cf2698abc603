use async_trait::async_trait;
use axum_helpers::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ScoreError, ScoreResult};
use crate::models::Score;

/// Repository trait for score persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    async fn create(&self, score: Score) -> ScoreResult<Score>;

    async fn get_by_id(&self, id: Uuid) -> ScoreResult<Option<Score>>;

    /// Oldest first.
    async fn list(&self, page: Pagination) -> ScoreResult<Vec<Score>>;

    /// Every score of one employee, oldest first.
    async fn list_by_employee(&self, employee_id: Uuid) -> ScoreResult<Vec<Score>>;

    /// Fails with `NotFound` when the score is gone.
    async fn update(&self, score: Score) -> ScoreResult<Score>;

    async fn delete(&self, id: Uuid) -> ScoreResult<bool>;
}

/// In-memory implementation of ScoreRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryScoreRepository {
    scores: Arc<RwLock<HashMap<Uuid, Score>>>,
}

impl InMemoryScoreRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(mut scores: Vec<Score>) -> Vec<Score> {
    scores.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
    scores
}

#[async_trait]
impl ScoreRepository for InMemoryScoreRepository {
    async fn create(&self, score: Score) -> ScoreResult<Score> {
        self.scores.write().await.insert(score.id, score.clone());

        tracing::info!(
            score_id = %score.id,
            employee_id = %score.employee_id,
            skill_id = %score.skill_id,
            trainer_id = %score.trainer_id,
            "Created score"
        );
        Ok(score)
    }

    async fn get_by_id(&self, id: Uuid) -> ScoreResult<Option<Score>> {
        Ok(self.scores.read().await.get(&id).cloned())
    }

    async fn list(&self, page: Pagination) -> ScoreResult<Vec<Score>> {
        let scores = self.scores.read().await;
        Ok(page.apply(sorted(scores.values().cloned().collect())))
    }

    async fn list_by_employee(&self, employee_id: Uuid) -> ScoreResult<Vec<Score>> {
        let scores = self.scores.read().await;
        Ok(sorted(
            scores
                .values()
                .filter(|s| s.employee_id == employee_id)
                .cloned()
                .collect(),
        ))
    }

    async fn update(&self, score: Score) -> ScoreResult<Score> {
        let mut scores = self.scores.write().await;

        let Some(slot) = scores.get_mut(&score.id) else {
            return Err(ScoreError::NotFound(score.id));
        };
        *slot = score.clone();

        tracing::info!(score_id = %score.id, "Updated score");
        Ok(score)
    }

    async fn delete(&self, id: Uuid) -> ScoreResult<bool> {
        let removed = self.scores.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(score_id = %id, "Deleted score");
        }
        Ok(removed)
    }
}
