use async_trait::async_trait;
use axum_helpers::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{Role, User};

/// Repository trait for account persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with `DuplicateEmail` when the email is
    /// taken, ignoring case.
    async fn create(&self, user: User) -> UserResult<User>;

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Case-insensitive lookup
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Accounts holding `role` (all accounts when `None`), oldest first,
    /// filtered before the page window is applied.
    async fn list(&self, role: Option<Role>, page: Pagination) -> UserResult<Vec<User>>;

    /// Replace a stored account. Fails with `NotFound` when it is gone.
    async fn update(&self, user: User) -> UserResult<User>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Matches the `lower(email)` unique index used by the Postgres store.
fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        // Check and insert under one write lock so concurrent registrations
        // cannot both claim the same email.
        let mut users = self.users.write().await;

        if users.values().any(|u| same_email(&u.email, &user.email)) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, role = %user.role, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| same_email(&u.email, email))
            .cloned())
    }

    async fn list(&self, role: Option<Role>, page: Pagination) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users
            .values()
            .filter(|u| role.is_none_or(|r| u.role == r))
            .cloned()
            .collect();

        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(page.apply(result))
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        let Some(slot) = users.get_mut(&user.id) else {
            return Err(UserError::NotFound(user.id));
        };
        *slot = user.clone();

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let removed = self.users.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, role: Role) -> User {
        User::new(
            email.to_string(),
            "Test".to_string(),
            "hash".to_string(),
            role,
            None,
            None,
            None,
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("ada@example.com", Role::Employee)).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "ada@example.com");

        let by_email = repo.get_by_email("ADA@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_duplicate_email_ignores_case() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("ada@example.com", Role::Employee)).await.unwrap();

        let result = repo.create(user("Ada@Example.com", Role::Trainer)).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_email_match_folds_non_ascii_case() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("émile@example.com", Role::Employee)).await.unwrap();

        let result = repo.create(user("ÉMILE@example.com", Role::Trainer)).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));

        let found = repo.get_by_email("Émile@Example.com").await.unwrap();
        assert_eq!(found.unwrap().email, "émile@example.com");
    }

    #[tokio::test]
    async fn test_list_filters_by_role_before_paging() {
        let repo = InMemoryUserRepository::new();
        for i in 0..3 {
            repo.create(user(&format!("t{i}@example.com"), Role::Trainer)).await.unwrap();
            repo.create(user(&format!("e{i}@example.com"), Role::Employee)).await.unwrap();
        }

        let employees = repo
            .list(Some(Role::Employee), Pagination::new(1, 10))
            .await
            .unwrap();
        assert_eq!(employees.len(), 2);
        assert!(employees.iter().all(|u| u.role == Role::Employee));
        assert_eq!(employees[0].email, "e1@example.com");

        let everyone = repo.list(None, Pagination::default()).await.unwrap();
        assert_eq!(everyone.len(), 6);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = InMemoryUserRepository::new();
        let result = repo.update(user("ghost@example.com", Role::Employee)).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(user("ada@example.com", Role::Manager)).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }
}
