//! In-app notifications: store and service.

use crate::error::{NotificationError, NotificationResult};
use crate::models::{CreateNotification, Notification};
use async_trait::async_trait;
use axum_helpers::Pagination;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, input: CreateNotification) -> NotificationResult<Notification>;

    async fn get(&self, id: Uuid) -> NotificationResult<Option<Notification>>;

    /// Newest first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        page: Pagination,
    ) -> NotificationResult<Vec<Notification>>;

    async fn count_unread(&self, user_id: Uuid) -> NotificationResult<u64>;

    /// Returns `None` when the id does not exist.
    async fn mark_read(&self, id: Uuid) -> NotificationResult<Option<Notification>>;

    async fn delete(&self, id: Uuid) -> NotificationResult<bool>;
}

#[derive(Clone, Default)]
pub struct InMemoryNotificationRepository {
    notifications: Arc<RwLock<HashMap<Uuid, Notification>>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(&self, input: CreateNotification) -> NotificationResult<Notification> {
        let notification = Notification::new(input);
        self.notifications
            .write()
            .await
            .insert(notification.id, notification.clone());

        tracing::info!(
            notification_id = %notification.id,
            user_id = %notification.user_id,
            kind = %notification.kind,
            "Created notification"
        );
        Ok(notification)
    }

    async fn get(&self, id: Uuid) -> NotificationResult<Option<Notification>> {
        Ok(self.notifications.read().await.get(&id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        page: Pagination,
    ) -> NotificationResult<Vec<Notification>> {
        let notifications = self.notifications.read().await;
        let mut found: Vec<Notification> = notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(page.apply(found))
    }

    async fn count_unread(&self, user_id: Uuid) -> NotificationResult<u64> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .values()
            .filter(|n| n.user_id == user_id && !n.read)
            .count() as u64)
    }

    async fn mark_read(&self, id: Uuid) -> NotificationResult<Option<Notification>> {
        let mut notifications = self.notifications.write().await;
        Ok(notifications.get_mut(&id).map(|n| {
            n.read = true;
            n.updated_at = Some(Utc::now());
            n.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> NotificationResult<bool> {
        let removed = self.notifications.write().await.remove(&id).is_some();
        if removed {
            tracing::info!(notification_id = %id, "Deleted notification");
        }
        Ok(removed)
    }
}

/// Records in-app notifications and serves them back to their recipient.
///
/// Reads and writes by id are scoped to the recipient: another user's
/// notification is reported as not found.
#[derive(Clone)]
pub struct InboxService {
    repository: Arc<dyn NotificationRepository>,
}

impl InboxService {
    pub fn new(repository: impl NotificationRepository + 'static) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn notify(&self, input: CreateNotification) -> NotificationResult<Notification> {
        self.repository.create(input).await
    }

    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        page: Pagination,
    ) -> NotificationResult<Vec<Notification>> {
        self.repository.list_for_user(user_id, page).await
    }

    pub async fn unread_count(&self, user_id: Uuid) -> NotificationResult<u64> {
        self.repository.count_unread(user_id).await
    }

    pub async fn mark_read(&self, user_id: Uuid, id: Uuid) -> NotificationResult<Notification> {
        self.owned(user_id, id).await?;
        self.repository
            .mark_read(id)
            .await?
            .ok_or(NotificationError::NotFound(id))
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> NotificationResult<()> {
        self.owned(user_id, id).await?;
        if !self.repository.delete(id).await? {
            return Err(NotificationError::NotFound(id));
        }
        Ok(())
    }

    async fn owned(&self, user_id: Uuid, id: Uuid) -> NotificationResult<Notification> {
        self.repository
            .get(id)
            .await?
            .filter(|n| n.user_id == user_id)
            .ok_or(NotificationError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationKind;

    fn create(user_id: Uuid, title: &str) -> CreateNotification {
        CreateNotification {
            user_id,
            kind: NotificationKind::Assessment,
            title: title.to_string(),
            message: "details".to_string(),
        }
    }

    fn inbox() -> InboxService {
        InboxService::new(InMemoryNotificationRepository::new())
    }

    #[tokio::test]
    async fn test_notifications_are_scoped_to_user() {
        let inbox = inbox();
        let ada = Uuid::now_v7();
        let bob = Uuid::now_v7();

        inbox.notify(create(ada, "first")).await.unwrap();
        inbox.notify(create(ada, "second")).await.unwrap();
        inbox.notify(create(bob, "other")).await.unwrap();

        let listed = inbox.list_for_user(ada, Pagination::default()).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "second");
        assert_eq!(inbox.unread_count(ada).await.unwrap(), 2);
        assert_eq!(inbox.unread_count(bob).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_is_paginated() {
        let inbox = inbox();
        let ada = Uuid::now_v7();
        for title in ["a", "b", "c"] {
            inbox.notify(create(ada, title)).await.unwrap();
        }

        let page = inbox.list_for_user(ada, Pagination::new(1, 1)).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "b");
    }

    #[tokio::test]
    async fn test_mark_read() {
        let inbox = inbox();
        let user = Uuid::now_v7();
        let created = inbox.notify(create(user, "score added")).await.unwrap();

        let read = inbox.mark_read(user, created.id).await.unwrap();
        assert!(read.read);
        assert!(read.updated_at.is_some());
        assert_eq!(inbox.unread_count(user).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mark_read_unknown_id() {
        let err = inbox().mark_read(Uuid::now_v7(), Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, NotificationError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_other_users_notification_is_not_found() {
        let inbox = inbox();
        let ada = Uuid::now_v7();
        let created = inbox.notify(create(ada, "private")).await.unwrap();

        let stranger = Uuid::now_v7();
        assert!(matches!(
            inbox.mark_read(stranger, created.id).await,
            Err(NotificationError::NotFound(_))
        ));
        assert!(matches!(
            inbox.delete(stranger, created.id).await,
            Err(NotificationError::NotFound(_))
        ));
        assert_eq!(inbox.unread_count(ada).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let inbox = inbox();
        let ada = Uuid::now_v7();
        let created = inbox.notify(create(ada, "done")).await.unwrap();

        inbox.delete(ada, created.id).await.unwrap();
        assert!(inbox.list_for_user(ada, Pagination::default()).await.unwrap().is_empty());
        assert!(matches!(
            inbox.delete(ada, created.id).await,
            Err(NotificationError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut repository = MockNotificationRepository::new();
        repository
            .expect_count_unread()
            .returning(|_| Err(NotificationError::Internal("pool timed out".to_string())));

        let inbox = InboxService::new(repository);
        assert!(matches!(
            inbox.unread_count(Uuid::now_v7()).await,
            Err(NotificationError::Internal(_))
        ));
    }
}
