use crate::error::{NotificationError, NotificationResult};
use crate::inbox::NotificationRepository;
use crate::models::{CreateNotification, Notification, NotificationKind};
use async_trait::async_trait;
use axum_helpers::Pagination;
use sea_orm::{ConnectionTrait, DbBackend, DbErr, FromQueryResult, Statement};
use uuid::Uuid;

/// PostgreSQL implementation of NotificationRepository using SeaORM
#[derive(Clone)]
pub struct PostgresNotificationRepository {
    db: sea_orm::DatabaseConnection,
}

impl PostgresNotificationRepository {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct NotificationRow {
    id: Uuid,
    user_id: Uuid,
    kind: String,
    title: String,
    message: String,
    read: bool,
    date: chrono::DateTime<chrono::Utc>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = NotificationError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind = row.kind.parse::<NotificationKind>().map_err(|_| {
            NotificationError::Internal(format!("Unknown notification kind in store: {}", row.kind))
        })?;

        Ok(Notification {
            id: row.id,
            user_id: row.user_id,
            kind,
            title: row.title,
            message: row.message,
            read: row.read,
            date: row.date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    count: i64,
}

fn db_error(e: DbErr) -> NotificationError {
    NotificationError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn create(&self, input: CreateNotification) -> NotificationResult<Notification> {
        let notification = Notification::new(input);
        let sql = r#"
            INSERT INTO notifications (id, user_id, kind, title, message, read, date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                notification.id.into(),
                notification.user_id.into(),
                notification.kind.to_string().into(),
                notification.title.clone().into(),
                notification.message.clone().into(),
                notification.read.into(),
                notification.date.into(),
                notification.created_at.into(),
                notification.updated_at.into(),
            ],
        );

        NotificationRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| NotificationError::Internal("Failed to create notification".to_string()))?
            .try_into()
    }

    async fn get(&self, id: Uuid) -> NotificationResult<Option<Notification>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM notifications WHERE id = $1",
            [id.into()],
        );

        NotificationRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(Notification::try_from)
            .transpose()
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        page: Pagination,
    ) -> NotificationResult<Vec<Notification>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY date DESC, id DESC OFFSET $2 LIMIT $3",
            [user_id.into(), page.offset().into(), page.limit().into()],
        );

        NotificationRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(Notification::try_from)
            .collect()
    }

    async fn count_unread(&self, user_id: Uuid) -> NotificationResult<u64> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT COUNT(*) AS count FROM notifications WHERE user_id = $1 AND NOT read",
            [user_id.into()],
        );

        let row = CountRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(row.map_or(0, |r| r.count.max(0) as u64))
    }

    async fn mark_read(&self, id: Uuid) -> NotificationResult<Option<Notification>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "UPDATE notifications SET read = TRUE, updated_at = $2 WHERE id = $1 RETURNING *",
            [id.into(), chrono::Utc::now().into()],
        );

        NotificationRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(Notification::try_from)
            .transpose()
    }

    async fn delete(&self, id: Uuid) -> NotificationResult<bool> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM notifications WHERE id = $1",
            [id.into()],
        );

        let result = self.db.execute_raw(stmt).await.map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
