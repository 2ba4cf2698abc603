//! E-mail delivery backends.
//!
//! No real transport ships with the service: [`LogEmailProvider`] records
//! each message in the log, [`MockEmailProvider`] captures them for tests.

mod log;
mod mock;

pub use log::LogEmailProvider;
pub use mock::MockEmailProvider;

use crate::error::NotificationResult;
use async_trait::async_trait;

/// Provider acknowledgement for a sent message.
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub message_id: String,
}

/// A rendered message ready for delivery.
#[derive(Debug, Clone, Default)]
pub struct EmailContent {
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send(&self, email: &EmailContent) -> NotificationResult<SentEmail>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}
