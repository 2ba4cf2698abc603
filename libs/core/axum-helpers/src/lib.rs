//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`auth`]**: stateless JWT issuing and verification
//! - **[`server`]**: router assembly, health endpoint, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: the `{"error": {"type", "message"}}` envelope
//! - **[`extractors`]**: `UuidPath`, `ValidatedJson`, `Pagination`
//! - **[`audit`]**: audit log events

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{JwtAuth, JwtClaims, JwtConfig, TokenPurpose, bearer_token};

pub use server::{
    API_PREFIX, HealthCheckFuture, HealthResponse, create_app, create_router, health_router,
    run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorResponse, error_response};

pub use extractors::{Pagination, UuidPath, ValidatedJson};

pub use audit::{AuditEvent, AuditOutcome, client_ip};
