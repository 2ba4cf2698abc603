//! Credential checks, session tokens and password reset.

use crate::error::{UserError, UserResult};
use crate::models::{AccessToken, LoginRequest, LoginResponse, PasswordResetConfirm, User};
use crate::password::{hash_password, verify_password};
use crate::repository::UserRepository;
use axum_helpers::{JwtAuth, TokenPurpose};
use chrono::{Duration, Utc};
use domain_notifications::NotificationService;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Lifetime of a password reset token
pub const PASSWORD_RESET_TTL_MINUTES: i64 = 30;

pub struct Authenticator<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
    notifier: Option<NotificationService>,
}

impl<R: UserRepository> Clone for Authenticator<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            jwt: self.jwt.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

impl<R: UserRepository> Authenticator<R> {
    pub fn new(repository: Arc<R>, jwt: JwtAuth) -> Self {
        Self {
            repository,
            jwt,
            notifier: None,
        }
    }

    /// Send password reset links through `notifier`.
    pub fn with_notifier(mut self, notifier: NotificationService) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// `None` for an unknown email or a wrong password.
    pub async fn authenticate(&self, email: &str, password: &str) -> UserResult<Option<User>> {
        let Some(user) = self.repository.get_by_email(email).await? else {
            tracing::debug!(email = %email, "Login attempt for unknown email");
            return Ok(None);
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
            return Ok(None);
        }

        Ok(Some(user))
    }

    pub fn issue_token(&self, user: &User) -> UserResult<AccessToken> {
        let access_token = self
            .jwt
            .create_access_token(&user.id.to_string())
            .map_err(|e| UserError::Internal(format!("Failed to sign token: {}", e)))?;

        Ok(AccessToken {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.jwt.access_token_ttl().num_seconds(),
        })
    }

    /// Map a session token to its user. Every token problem, and a user that
    /// no longer exists, yields `None`; only store failures are errors.
    pub async fn resolve_token(&self, token: &str) -> UserResult<Option<User>> {
        let Some(user_id) = self.token_subject(token, TokenPurpose::Access) else {
            return Ok(None);
        };

        self.repository.get_by_id(user_id).await
    }

    pub async fn login(&self, input: LoginRequest) -> UserResult<LoginResponse> {
        let user = self
            .authenticate(&input.email, &input.password)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let token = self.issue_token(&user)?;
        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    pub fn issue_reset_token(&self, user: &User) -> UserResult<String> {
        self.jwt
            .create_token(
                &user.id.to_string(),
                TokenPurpose::PasswordReset,
                Duration::minutes(PASSWORD_RESET_TTL_MINUTES),
            )
            .map_err(|e| UserError::Internal(format!("Failed to sign reset token: {}", e)))
    }

    /// Mail a reset link to `email` if it belongs to an account. Succeeds
    /// whether or not it does.
    pub async fn request_password_reset(&self, email: &str) -> UserResult<()> {
        let Some(user) = self.repository.get_by_email(email).await? else {
            tracing::debug!(email = %email, "Password reset requested for unknown email");
            return Ok(());
        };

        let token = self.issue_reset_token(&user)?;

        match &self.notifier {
            Some(notifier) => {
                if let Err(e) = notifier
                    .send_password_reset_email(
                        &user.email,
                        &user.name,
                        &token,
                        PASSWORD_RESET_TTL_MINUTES,
                    )
                    .await
                {
                    tracing::warn!(
                        user_id = %user.id,
                        email = %user.email,
                        error = %e,
                        "Failed to send password reset email"
                    );
                }
            }
            None => tracing::debug!(user_id = %user.id, "No notifier configured, reset email skipped"),
        }

        Ok(())
    }

    pub async fn reset_password(&self, input: PasswordResetConfirm) -> UserResult<()> {
        input.validate()?;

        let user_id = self
            .token_subject(&input.token, TokenPurpose::PasswordReset)
            .ok_or(UserError::InvalidResetToken)?;

        let mut user = self
            .repository
            .get_by_id(user_id)
            .await?
            .ok_or(UserError::InvalidResetToken)?;

        user.password_hash = hash_password(&input.new_password)?;
        user.updated_at = Some(Utc::now());
        self.repository.update(user).await?;

        tracing::info!(user_id = %user_id, "Password reset");
        Ok(())
    }

    fn token_subject(&self, token: &str, purpose: TokenPurpose) -> Option<Uuid> {
        match self.jwt.verify_token(token, purpose) {
            Ok(claims) => Uuid::parse_str(&claims.sub).ok(),
            Err(e) => {
                tracing::debug!(error = %e, ?purpose, "Rejected token");
                None
            }
        }
    }
}
