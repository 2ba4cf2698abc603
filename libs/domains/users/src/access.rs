//! Role-based authorization.
//!
//! The identity middleware turns a bearer token into a [`CurrentUser`] in the
//! request extensions and never rejects on its own. Handlers that need a
//! caller extract [`CurrentUser`] (absent means 401) and check it against a
//! [`RoleGroup`] (mismatch means 403).

use crate::auth::Authenticator;
use crate::models::{Role, User};
use crate::repository::UserRepository;
use axum::{
    Router,
    extract::{FromRequestParts, Request, State},
    http::{HeaderValue, StatusCode, header, request::Parts},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use axum_helpers::{bearer_token, error_response};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error("Not enough permissions")]
    Forbidden,
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        match self {
            AccessError::Unauthenticated => {
                let mut response = error_response(
                    StatusCode::UNAUTHORIZED,
                    "unauthenticated",
                    self.to_string(),
                );
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                response
            }
            AccessError::Forbidden => {
                error_response(StatusCode::FORBIDDEN, "forbidden", self.to_string())
            }
        }
    }
}

/// Fixed sets of roles allowed through a gate. There is no hierarchy: a
/// super-user does not pass an employee-only or trainer-only gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleGroup {
    EmployeeOnly,
    TrainerOnly,
    ManagerOrSuperUser,
    SuperUserOnly,
}

impl RoleGroup {
    pub const fn roles(self) -> &'static [Role] {
        match self {
            RoleGroup::EmployeeOnly => &[Role::Employee],
            RoleGroup::TrainerOnly => &[Role::Trainer],
            RoleGroup::ManagerOrSuperUser => &[Role::Manager, Role::SuperUser],
            RoleGroup::SuperUserOnly => &[Role::SuperUser],
        }
    }

    pub fn allows(self, role: Role) -> bool {
        self.roles().contains(&role)
    }
}

pub fn authorize(role: Role, required: &[Role]) -> Result<(), AccessError> {
    if required.contains(&role) {
        Ok(())
    } else {
        Err(AccessError::Forbidden)
    }
}

/// The authenticated caller, placed in request extensions by
/// [`identity_middleware`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn require(&self, group: RoleGroup) -> Result<&User, AccessError> {
        authorize(self.0.role, group.roles()).inspect_err(|_| {
            tracing::debug!(user_id = %self.0.id, role = %self.0.role, ?group, "Access denied");
        })?;
        Ok(&self.0)
    }

    /// Passes when the caller is `owner`, otherwise falls back to `group`.
    pub fn require_self_or(&self, owner: Uuid, group: RoleGroup) -> Result<&User, AccessError> {
        if self.0.id == owner {
            return Ok(&self.0);
        }
        self.require(group)
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AccessError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AccessError::Unauthenticated)
    }
}

pub async fn identity_middleware<R: UserRepository + 'static>(
    State(auth): State<Authenticator<R>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = bearer_token(request.headers()).map(str::to_owned);

    if let Some(token) = token {
        match auth.resolve_token(&token).await {
            Ok(Some(user)) => {
                request.extensions_mut().insert(CurrentUser(user));
            }
            Ok(None) => {}
            Err(e) => return e.into_response(),
        }
    }

    next.run(request).await
}

/// Wrap `router` so every request passes through [`identity_middleware`].
pub fn with_identity<R: UserRepository + 'static>(router: Router, auth: Authenticator<R>) -> Router {
    router.layer(middleware::from_fn_with_state(auth, identity_middleware::<R>))
}
