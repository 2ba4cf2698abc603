//! Token signing configuration.

use core_config::{ConfigError, FromEnv, env_parse, env_required};
use jsonwebtoken::Algorithm;

pub const MIN_SECRET_LEN: usize = 32;
pub const DEFAULT_ACCESS_TOKEN_MINUTES: i64 = 30;
/// One year.
pub const MAX_ACCESS_TOKEN_MINUTES: i64 = 60 * 24 * 365;

/// JWT signing configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required, at least 32 characters)
/// - `JWT_ALGORITHM` (`HS256` | `HS384` | `HS512`, default `HS256`)
/// - `ACCESS_TOKEN_EXPIRE_MINUTES` (default 30, at most one year)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub access_token_ttl: chrono::Duration,
}

impl JwtConfig {
    /// Build a config with the default algorithm and lifetime.
    ///
    /// # Panics
    /// Panics if the secret is shorter than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= MIN_SECRET_LEN,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            algorithm: Algorithm::HS256,
            access_token_ttl: chrono::Duration::minutes(DEFAULT_ACCESS_TOKEN_MINUTES),
        }
    }

    pub fn with_access_token_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

fn parse_hmac_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(ConfigError::ParseError {
            key: "JWT_ALGORITHM".to_string(),
            details: format!("unsupported algorithm '{}', expected HS256, HS384 or HS512", other),
        }),
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let algorithm = parse_hmac_algorithm(&env_parse("JWT_ALGORITHM", "HS256".to_string())?)?;
        let minutes: i64 = env_parse("ACCESS_TOKEN_EXPIRE_MINUTES", DEFAULT_ACCESS_TOKEN_MINUTES)?;

        if !(1..=MAX_ACCESS_TOKEN_MINUTES).contains(&minutes) {
            return Err(ConfigError::ParseError {
                key: "ACCESS_TOKEN_EXPIRE_MINUTES".to_string(),
                details: format!(
                    "must be between 1 and {} minutes (got {})",
                    MAX_ACCESS_TOKEN_MINUTES, minutes
                ),
            });
        }

        Ok(Self {
            secret,
            algorithm,
            access_token_ttl: chrono::Duration::minutes(minutes),
        })
    }
}
