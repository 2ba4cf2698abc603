use domain_notifications::{CreateNotification, InboxService, NotificationKind};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{LearningError, LearningResult};
use crate::models::{
    AssignLearningPath, CreateLearningStep, LearningPath, LearningPathWithSteps, LearningStep,
    UpdateLearningStep,
};
use crate::repository::LearningRepository;

pub struct LearningService<R: LearningRepository> {
    repository: Arc<R>,
    inbox: Option<InboxService>,
}

impl<R: LearningRepository> Clone for LearningService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            inbox: self.inbox.clone(),
        }
    }
}

impl<R: LearningRepository> LearningService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            inbox: None,
        }
    }

    pub fn with_inbox(mut self, inbox: InboxService) -> Self {
        self.inbox = Some(inbox);
        self
    }

    /// Assign a new path. The employee is told through the inbox when one
    /// is configured; a failure there is logged only.
    #[instrument(skip(self, input), fields(employee_id = %input.employee_id))]
    pub async fn assign_path(&self, input: AssignLearningPath) -> LearningResult<LearningPath> {
        input.validate()?;

        let path = self.repository.create_path(LearningPath::new(input)).await?;

        if let Some(inbox) = &self.inbox {
            let notification = CreateNotification {
                user_id: path.employee_id,
                kind: NotificationKind::LearningPath,
                title: "New learning path".to_string(),
                message: format!("You have been assigned \"{}\"", path.title),
            };
            if let Err(e) = inbox.notify(notification).await {
                tracing::warn!(path_id = %path.id, error = %e, "Failed to record learning path notification");
            }
        }

        Ok(path)
    }

    #[instrument(skip(self))]
    pub async fn get_path(&self, id: Uuid) -> LearningResult<LearningPath> {
        self.repository
            .get_path(id)
            .await?
            .ok_or(LearningError::PathNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_paths_for_employee(&self, employee_id: Uuid) -> LearningResult<Vec<LearningPath>> {
        self.repository.list_paths_for_employee(employee_id).await
    }

    #[instrument(skip(self, input))]
    pub async fn add_step(
        &self,
        learning_path_id: Uuid,
        input: CreateLearningStep,
    ) -> LearningResult<LearningStep> {
        input.validate()?;
        self.get_path(learning_path_id).await?;

        self.repository
            .create_step(LearningStep::new(learning_path_id, input))
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_steps(&self, learning_path_id: Uuid) -> LearningResult<Vec<LearningStep>> {
        self.get_path(learning_path_id).await?;
        self.repository.list_steps(learning_path_id).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_step(&self, id: Uuid, update: UpdateLearningStep) -> LearningResult<LearningStep> {
        update.validate()?;

        let mut step = self
            .repository
            .get_step(id)
            .await?
            .ok_or(LearningError::StepNotFound(id))?;
        step.apply_update(update);
        self.repository.update_step(step).await
    }

    /// The path a step belongs to.
    #[instrument(skip(self))]
    pub async fn path_for_step(&self, step_id: Uuid) -> LearningResult<LearningPath> {
        let step = self
            .repository
            .get_step(step_id)
            .await?
            .ok_or(LearningError::StepNotFound(step_id))?;
        self.get_path(step.learning_path_id).await
    }

    #[instrument(skip(self))]
    pub async fn path_with_steps(&self, id: Uuid) -> LearningResult<LearningPathWithSteps> {
        let path = self.get_path(id).await?;
        let steps = self.repository.list_steps(id).await?;
        Ok(LearningPathWithSteps::new(path, steps))
    }
}
