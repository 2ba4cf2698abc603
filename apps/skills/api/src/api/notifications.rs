//! The caller's own in-app notifications.
//!
//! Every route is scoped to the authenticated user. Notifications addressed
//! to someone else answer 404, the same as ids that do not exist.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, put},
};
use axum_helpers::{
    Pagination, UuidPath,
    errors::responses::{
        BadRequestUuidResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
};
use domain_notifications::{InboxService, Notification, NotificationResult, UnreadCount};
use domain_users::CurrentUser;
use utoipa::OpenApi;
use uuid::Uuid;

const TAG: &str = "notifications";

#[derive(OpenApi)]
#[openapi(
    paths(list_notifications, unread_count, mark_read, delete_notification),
    components(
        schemas(Notification, UnreadCount),
        responses(
            NotFoundResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "In-app notifications for the signed-in user")
    )
)]
pub struct ApiDoc;

pub fn router(inbox: InboxService) -> Router {
    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_count))
        .route("/{id}/read", put(mark_read))
        .route("/{id}", delete(delete_notification))
        .with_state(inbox)
}

/// List the caller's notifications, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(Pagination),
    responses(
        (status = 200, description = "The caller's notifications", body = Vec<Notification>),
        (status = 400, description = "Invalid pagination"),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn list_notifications(
    State(inbox): State<InboxService>,
    current: CurrentUser,
    page: Pagination,
) -> NotificationResult<Json<Vec<Notification>>> {
    Ok(Json(inbox.list_for_user(current.0.id, page).await?))
}

/// Count the caller's unread notifications
#[utoipa::path(
    get,
    path = "/unread-count",
    tag = TAG,
    responses(
        (status = 200, description = "Unread notifications", body = UnreadCount),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn unread_count(
    State(inbox): State<InboxService>,
    current: CurrentUser,
) -> NotificationResult<Json<UnreadCount>> {
    let unread = inbox.unread_count(current.0.id).await?;
    Ok(Json(UnreadCount { unread }))
}

/// Mark one of the caller's notifications as read
#[utoipa::path(
    put,
    path = "/{id}/read",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked as read", body = Notification),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn mark_read(
    State(inbox): State<InboxService>,
    current: CurrentUser,
    UuidPath(id): UuidPath,
) -> NotificationResult<Json<Notification>> {
    Ok(Json(inbox.mark_read(current.0.id, id).await?))
}

/// Delete one of the caller's notifications
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 204, description = "Notification deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer" = []))
)]
async fn delete_notification(
    State(inbox): State<InboxService>,
    current: CurrentUser,
    UuidPath(id): UuidPath,
) -> NotificationResult<StatusCode> {
    inbox.delete(current.0.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
