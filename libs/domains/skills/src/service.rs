//! Skill Service - Business logic layer

use axum_helpers::Pagination;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{SkillError, SkillResult};
use crate::models::{CreateSkill, Skill, UpdateSkill};
use crate::repository::SkillRepository;

pub struct SkillService<R: SkillRepository> {
    repository: Arc<R>,
}

impl<R: SkillRepository> Clone for SkillService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: SkillRepository> SkillService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, input), fields(skill_name = %input.name))]
    pub async fn create(&self, input: CreateSkill) -> SkillResult<Skill> {
        input.validate()?;
        self.repository.create(Skill::new(input)).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> SkillResult<Skill> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(SkillError::NotFound(id))
    }

    /// `None` when the skill does not exist.
    pub async fn find(&self, id: Uuid) -> SkillResult<Option<Skill>> {
        self.repository.get_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self, page: Pagination) -> SkillResult<Vec<Skill>> {
        self.repository.list(page).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_category(&self, category: &str) -> SkillResult<Vec<Skill>> {
        self.repository.list_by_category(category).await
    }

    #[instrument(skip(self, update))]
    pub async fn update(&self, id: Uuid, update: UpdateSkill) -> SkillResult<Skill> {
        update.validate()?;

        let mut skill = self.get(id).await?;
        skill.apply_update(update);
        self.repository.update(skill).await
    }

    /// Scores that reference the skill are left in place.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> SkillResult<()> {
        if !self.repository.delete(id).await? {
            return Err(SkillError::NotFound(id));
        }
        Ok(())
    }
}
