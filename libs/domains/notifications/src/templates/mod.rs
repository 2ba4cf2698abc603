//! Handlebars templates for account e-mails.
//!
//! Plain-text templates use triple-stash so URLs are not HTML-escaped.

use crate::error::NotificationResult;
use crate::models::{PasswordResetEmailData, WelcomeEmailData};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

/// Rendered e-mail content.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Register every template. Fails only if a template does not parse.
    pub fn new() -> NotificationResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);

        handlebars.register_template_string("welcome_html", WELCOME_HTML_TEMPLATE)?;
        handlebars.register_template_string("welcome_text", WELCOME_TEXT_TEMPLATE)?;
        handlebars.register_template_string("password_reset_html", PASSWORD_RESET_HTML_TEMPLATE)?;
        handlebars.register_template_string("password_reset_text", PASSWORD_RESET_TEXT_TEMPLATE)?;

        Ok(Self { handlebars })
    }

    fn render<T: Serialize>(&self, template_name: &str, data: &T) -> NotificationResult<String> {
        Ok(self.handlebars.render(template_name, data)?)
    }

    pub fn render_welcome(&self, data: &WelcomeEmailData) -> NotificationResult<RenderedEmail> {
        debug!(user = %data.user_name, "Rendering welcome email");

        Ok(RenderedEmail {
            subject: format!("Welcome to {}", data.app_name),
            html: self.render("welcome_html", data)?,
            text: self.render("welcome_text", data)?,
        })
    }

    pub fn render_password_reset(
        &self,
        data: &PasswordResetEmailData,
    ) -> NotificationResult<RenderedEmail> {
        debug!(user = %data.user_name, "Rendering password reset email");

        Ok(RenderedEmail {
            subject: "Password Reset Request".to_string(),
            html: self.render("password_reset_html", data)?,
            text: self.render("password_reset_text", data)?,
        })
    }
}

const WELCOME_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family: sans-serif; color: #1f2937;">
  <h1>Welcome {{user_name}}!</h1>
  <p>Your account has been created successfully.</p>
  <table>
    <tr><td>Email</td><td>{{user_email}}</td></tr>
    <tr><td>Role</td><td>{{role}}</td></tr>
  </table>
  <p><a href="{{login_url}}">Sign in to {{app_name}}</a></p>
</body>
</html>"#;

const WELCOME_TEXT_TEMPLATE: &str = r#"Welcome {{user_name}}! Your account has been created successfully.

Email: {{{user_email}}}
Role: {{role}}

Sign in to {{app_name}}: {{{login_url}}}
"#;

const PASSWORD_RESET_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family: sans-serif; color: #1f2937;">
  <h1>Password reset</h1>
  <p>Hi {{user_name}}, we received a request to reset your {{app_name}} password.</p>
  <p><a href="{{reset_url}}">Choose a new password</a></p>
  <p>Your password reset token is: <code>{{reset_token}}</code></p>
  <p>The link expires in {{expiry_minutes}} minutes. If you did not ask for this, ignore this e-mail.</p>
</body>
</html>"#;

const PASSWORD_RESET_TEXT_TEMPLATE: &str = r#"Hi {{user_name}},

Your password reset token is: {{{reset_token}}}

Choose a new password: {{{reset_url}}}
The link expires in {{expiry_minutes}} minutes. If you did not ask for this, ignore this e-mail.
"#;
