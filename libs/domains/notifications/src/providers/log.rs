use super::{EmailContent, EmailProvider, SentEmail};
use crate::error::NotificationResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Default provider when no delivery backend is configured: every message
/// is accepted and written to the log instead of being delivered.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEmailProvider;

#[async_trait]
impl EmailProvider for LogEmailProvider {
    async fn send(&self, email: &EmailContent) -> NotificationResult<SentEmail> {
        let message_id = format!("log-{}", Uuid::now_v7());
        tracing::info!(
            to = %email.to_email,
            subject = %email.subject,
            message_id = %message_id,
            "Mock email sent"
        );
        Ok(SentEmail { message_id })
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
