//! Reusable OpenAPI response components for the shared error envelope.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({"error": {"type": "internal_error", "message": "An internal error occurred"}})
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "error": {
            "type": "validation_error",
            "message": "Request validation failed",
            "details": {"email": [{"code": "email", "message": null, "params": {"value": "nope"}}]}
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid UUID",
    content_type = "application/json",
    example = json!({"error": {"type": "bad_request", "message": "Invalid UUID: abc"}})
)]
pub struct BadRequestUuidResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({"error": {"type": "not_found", "message": "Resource not found"}})
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - missing, invalid or expired credentials",
    content_type = "application/json",
    example = json!({"error": {"type": "unauthenticated", "message": "Could not validate credentials"}})
)]
pub struct UnauthorizedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Forbidden - role not permitted",
    content_type = "application/json",
    example = json!({"error": {"type": "forbidden", "message": "Not enough permissions"}})
)]
pub struct ForbiddenResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - resource already exists",
    content_type = "application/json",
    example = json!({"error": {"type": "duplicate", "message": "Email already registered"}})
)]
pub struct ConflictResponse(pub ErrorResponse);
