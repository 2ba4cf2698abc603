use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

/// Template data for the welcome e-mail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeEmailData {
    pub app_name: String,
    pub user_name: String,
    pub user_email: String,
    pub role: String,
    pub login_url: String,
}

/// Template data for the password reset e-mail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetEmailData {
    pub app_name: String,
    pub user_name: String,
    pub reset_token: String,
    pub reset_url: String,
    pub expiry_minutes: i64,
}

/// Category of an in-app notification.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    Feedback,
    StatusChange,
    LearningPath,
    Assessment,
}

/// In-app notification shown to a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn new(input: CreateNotification) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id: input.user_id,
            kind: input.kind,
            title: input.title,
            message: input.message,
            read: false,
            date: now,
            created_at: now,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct UnreadCount {
    pub unread: u64,
}
