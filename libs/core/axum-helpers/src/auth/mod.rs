//! Stateless JWT signing and verification.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, TokenPurpose};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//! let token = auth.create_access_token(&user_id.to_string())?;
//! let claims = auth.verify_token(&token, TokenPurpose::Access)?;
//! ```

pub mod config;
pub mod jwt;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, TokenPurpose, bearer_token};
