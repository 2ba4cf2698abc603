use async_trait::async_trait;
use axum_helpers::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{SkillError, SkillResult};
use crate::models::Skill;

/// Repository trait for the skill catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Fails with `DuplicateName` when the name is taken.
    async fn create(&self, skill: Skill) -> SkillResult<Skill>;

    async fn get_by_id(&self, id: Uuid) -> SkillResult<Option<Skill>>;

    /// Oldest first.
    async fn list(&self, page: Pagination) -> SkillResult<Vec<Skill>>;

    /// Exact category match, unpaginated.
    async fn list_by_category(&self, category: &str) -> SkillResult<Vec<Skill>>;

    /// Fails with `NotFound` when the skill is gone and `DuplicateName` when
    /// another skill already has the new name.
    async fn update(&self, skill: Skill) -> SkillResult<Skill>;

    async fn delete(&self, id: Uuid) -> SkillResult<bool>;
}

/// In-memory implementation of SkillRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemorySkillRepository {
    skills: Arc<RwLock<HashMap<Uuid, Skill>>>,
}

impl InMemorySkillRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(mut skills: Vec<Skill>) -> Vec<Skill> {
    skills.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    skills
}

#[async_trait]
impl SkillRepository for InMemorySkillRepository {
    async fn create(&self, skill: Skill) -> SkillResult<Skill> {
        let mut skills = self.skills.write().await;

        if skills.values().any(|s| s.name == skill.name) {
            return Err(SkillError::DuplicateName(skill.name));
        }

        skills.insert(skill.id, skill.clone());

        tracing::info!(skill_id = %skill.id, name = %skill.name, "Created skill");
        Ok(skill)
    }

    async fn get_by_id(&self, id: Uuid) -> SkillResult<Option<Skill>> {
        Ok(self.skills.read().await.get(&id).cloned())
    }

    async fn list(&self, page: Pagination) -> SkillResult<Vec<Skill>> {
        let skills = self.skills.read().await;
        Ok(page.apply(sorted(skills.values().cloned().collect())))
    }

    async fn list_by_category(&self, category: &str) -> SkillResult<Vec<Skill>> {
        let skills = self.skills.read().await;
        Ok(sorted(
            skills
                .values()
                .filter(|s| s.category == category)
                .cloned()
                .collect(),
        ))
    }

    async fn update(&self, skill: Skill) -> SkillResult<Skill> {
        let mut skills = self.skills.write().await;

        if !skills.contains_key(&skill.id) {
            return Err(SkillError::NotFound(skill.id));
        }
        if skills
            .values()
            .any(|s| s.id != skill.id && s.name == skill.name)
        {
            return Err(SkillError::DuplicateName(skill.name));
        }

        skills.insert(skill.id, skill.clone());

        tracing::info!(skill_id = %skill.id, "Updated skill");
        Ok(skill)
    }

    async fn delete(&self, id: Uuid) -> SkillResult<bool> {
        let removed = self.skills.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(skill_id = %id, "Deleted skill");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateSkill, UpdateSkill};

    fn skill(name: &str, category: &str) -> Skill {
        Skill::new(CreateSkill {
            name: name.to_string(),
            category: category.to_string(),
            description: None,
        })
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let repo = InMemorySkillRepository::new();
        repo.create(skill("Rust", "Programming")).await.unwrap();

        let result = repo.create(skill("Rust", "Systems")).await;
        assert!(matches!(result, Err(SkillError::DuplicateName(name)) if name == "Rust"));
    }

    #[tokio::test]
    async fn test_rename_onto_existing_name_rejected() {
        let repo = InMemorySkillRepository::new();
        repo.create(skill("Rust", "Programming")).await.unwrap();
        let mut go = repo.create(skill("Go", "Programming")).await.unwrap();

        go.apply_update(UpdateSkill {
            name: Some("Rust".to_string()),
            ..Default::default()
        });
        assert!(matches!(repo.update(go).await, Err(SkillError::DuplicateName(_))));
    }

    #[tokio::test]
    async fn test_update_keeping_own_name() {
        let repo = InMemorySkillRepository::new();
        let mut rust = repo.create(skill("Rust", "Programming")).await.unwrap();

        rust.apply_update(UpdateSkill {
            category: Some("Systems".to_string()),
            ..Default::default()
        });
        let updated = repo.update(rust).await.unwrap();
        assert_eq!(updated.category, "Systems");
    }

    #[tokio::test]
    async fn test_list_by_category_is_exact() {
        let repo = InMemorySkillRepository::new();
        repo.create(skill("Rust", "Programming")).await.unwrap();
        repo.create(skill("Docker", "DevOps")).await.unwrap();
        repo.create(skill("Python", "Programming")).await.unwrap();

        let programming = repo.list_by_category("Programming").await.unwrap();
        let names: Vec<_> = programming.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Rust", "Python"]);

        assert!(repo.list_by_category("programming").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_pages() {
        let repo = InMemorySkillRepository::new();
        for name in ["A", "B", "C"] {
            repo.create(skill(name, "X")).await.unwrap();
        }

        let page = repo.list(Pagination::new(1, 1)).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "B");
    }
}
