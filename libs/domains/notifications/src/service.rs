//! Account e-mails: welcome and password reset.

use crate::error::NotificationResult;
use crate::models::{PasswordResetEmailData, WelcomeEmailData};
use crate::providers::{EmailContent, EmailProvider};
use crate::templates::{RenderedEmail, TemplateEngine};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// Product name used in subjects and bodies.
    pub app_name: String,
    /// Base URL of the web frontend; links in e-mails point here.
    pub frontend_url: String,
}

impl NotificationConfig {
    pub fn new(frontend_url: impl Into<String>) -> Self {
        Self {
            frontend_url: frontend_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            app_name: "Skills Tracking Portal".to_string(),
            frontend_url: "http://localhost:8080".to_string(),
        }
    }
}

/// Renders account e-mails and hands them to the configured provider.
///
/// Every method returns the provider outcome; callers that treat mail as a
/// side effect log the error and carry on.
#[derive(Clone)]
pub struct NotificationService {
    provider: Arc<dyn EmailProvider>,
    templates: Arc<TemplateEngine>,
    config: NotificationConfig,
}

impl NotificationService {
    pub fn new(
        provider: Arc<dyn EmailProvider>,
        config: NotificationConfig,
    ) -> NotificationResult<Self> {
        Ok(Self {
            provider,
            templates: Arc::new(TemplateEngine::new()?),
            config,
        })
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn send_welcome_email(
        &self,
        email: &str,
        name: &str,
        role: &str,
    ) -> NotificationResult<()> {
        let rendered = self.templates.render_welcome(&WelcomeEmailData {
            app_name: self.config.app_name.clone(),
            user_name: name.to_string(),
            user_email: email.to_string(),
            role: role.to_string(),
            login_url: format!("{}/login", self.config.frontend_url),
        })?;

        self.deliver(email, name, rendered).await
    }

    pub async fn send_password_reset_email(
        &self,
        email: &str,
        name: &str,
        reset_token: &str,
        expiry_minutes: i64,
    ) -> NotificationResult<()> {
        let rendered = self.templates.render_password_reset(&PasswordResetEmailData {
            app_name: self.config.app_name.clone(),
            user_name: name.to_string(),
            reset_token: reset_token.to_string(),
            reset_url: format!(
                "{}/reset-password?token={}",
                self.config.frontend_url, reset_token
            ),
            expiry_minutes,
        })?;

        self.deliver(email, name, rendered).await
    }

    async fn deliver(&self, to: &str, name: &str, rendered: RenderedEmail) -> NotificationResult<()> {
        let content = EmailContent {
            to_email: to.to_string(),
            to_name: name.to_string(),
            subject: rendered.subject,
            html_body: rendered.html,
            text_body: rendered.text,
        };

        let sent = self.provider.send(&content).await?;
        info!(
            provider = self.provider.name(),
            to = %to,
            subject = %content.subject,
            message_id = %sent.message_id,
            "Email sent"
        );
        Ok(())
    }
}
