//! Users Domain
//!
//! Accounts for every role (employee, trainer, manager, super-user) live in
//! one store; the employee, trainer and manager directories are filtered
//! views over it.
//!
//! # Features
//!
//! - Registration with argon2 password hashing and a best-effort welcome mail
//! - Login issuing signed, time-limited bearer tokens
//! - Password reset through mailed reset tokens
//! - Role-group authorization ([`RoleGroup`], [`CurrentUser`])
//! - Role-filtered directories ([`Directory`])
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ identity layer   │  ← bearer token → CurrentUser
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │    Handlers      │  ← HTTP endpoints, role gates
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │ Service / Auth   │  ← registration, directories, tokens
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │   Repository     │  ← in-memory or Postgres
//! └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{
//!     Authenticator, Directory, InMemoryUserRepository, UserService, auth_router,
//!     directory_router, with_identity,
//! };
//!
//! let repository = Arc::new(InMemoryUserRepository::new());
//! let jwt = JwtAuth::new(&JwtConfig::new("a-secret-of-at-least-thirty-two-chars"));
//! let auth = Authenticator::new(repository.clone(), jwt);
//! let users = Arc::new(UserService::new(repository));
//!
//! let router = axum::Router::new()
//!     .nest("/auth", auth_router(users.clone(), auth.clone()))
//!     .nest("/employees", directory_router(users, Directory::Employees));
//! let router = with_identity(router, auth);
//! ```

pub mod access;
pub mod auth;
pub mod auth_handlers;
pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;

pub use access::{AccessError, CurrentUser, RoleGroup, authorize, identity_middleware, with_identity};
pub use auth::Authenticator;
pub use auth_handlers::{AuthApiDoc, auth_router};
pub use error::{UserError, UserResult};
pub use handlers::{ApiDoc, directory_router};
pub use models::{
    AccessToken, CreateMember, LoginRequest, LoginResponse, RegisterUser, Role, UpdateProfile,
    User, UserResponse,
};
pub use postgres::PostgresUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{Directory, RoleDirectory, UserService};
