use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{LearningError, LearningResult};
use crate::models::{LearningPath, LearningStep};

/// Storage for learning paths and their steps
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LearningRepository: Send + Sync {
    async fn create_path(&self, path: LearningPath) -> LearningResult<LearningPath>;

    async fn get_path(&self, id: Uuid) -> LearningResult<Option<LearningPath>>;

    /// Oldest assignment first.
    async fn list_paths_for_employee(&self, employee_id: Uuid) -> LearningResult<Vec<LearningPath>>;

    async fn create_step(&self, step: LearningStep) -> LearningResult<LearningStep>;

    async fn get_step(&self, id: Uuid) -> LearningResult<Option<LearningStep>>;

    /// In insertion order.
    async fn list_steps(&self, learning_path_id: Uuid) -> LearningResult<Vec<LearningStep>>;

    /// Fails with `StepNotFound` when the step is gone.
    async fn update_step(&self, step: LearningStep) -> LearningResult<LearningStep>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryLearningRepository {
    paths: Arc<RwLock<HashMap<Uuid, LearningPath>>>,
    steps: Arc<RwLock<HashMap<Uuid, LearningStep>>>,
}

impl InMemoryLearningRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LearningRepository for InMemoryLearningRepository {
    async fn create_path(&self, path: LearningPath) -> LearningResult<LearningPath> {
        self.paths.write().await.insert(path.id, path.clone());

        tracing::info!(
            path_id = %path.id,
            employee_id = %path.employee_id,
            "Created learning path"
        );
        Ok(path)
    }

    async fn get_path(&self, id: Uuid) -> LearningResult<Option<LearningPath>> {
        Ok(self.paths.read().await.get(&id).cloned())
    }

    async fn list_paths_for_employee(&self, employee_id: Uuid) -> LearningResult<Vec<LearningPath>> {
        let paths = self.paths.read().await;
        let mut found: Vec<LearningPath> = paths
            .values()
            .filter(|p| p.employee_id == employee_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.assigned_date.cmp(&b.assigned_date).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn create_step(&self, step: LearningStep) -> LearningResult<LearningStep> {
        self.steps.write().await.insert(step.id, step.clone());

        tracing::info!(
            step_id = %step.id,
            path_id = %step.learning_path_id,
            "Created learning step"
        );
        Ok(step)
    }

    async fn get_step(&self, id: Uuid) -> LearningResult<Option<LearningStep>> {
        Ok(self.steps.read().await.get(&id).cloned())
    }

    async fn list_steps(&self, learning_path_id: Uuid) -> LearningResult<Vec<LearningStep>> {
        let steps = self.steps.read().await;
        let mut found: Vec<LearningStep> = steps
            .values()
            .filter(|s| s.learning_path_id == learning_path_id)
            .cloned()
            .collect();
        // v7 ids sort by creation time
        found.sort_by_key(|s| s.id);
        Ok(found)
    }

    async fn update_step(&self, step: LearningStep) -> LearningResult<LearningStep> {
        let mut steps = self.steps.write().await;

        let Some(slot) = steps.get_mut(&step.id) else {
            return Err(LearningError::StepNotFound(step.id));
        };
        *slot = step.clone();

        tracing::info!(step_id = %step.id, completed = step.completed, "Updated learning step");
        Ok(step)
    }
}
