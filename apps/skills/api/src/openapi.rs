use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the `bearer` scheme the secured operations refer to.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token from POST /api/v1/auth/login"))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Employee Skills Tracking API",
        version = "1.0.0",
        description = "Employee skills, trainer assessments, learning paths and notifications"
    ),
    servers(
        (url = "/api/v1", description = "API base path")
    ),
    nest(
        (path = "/auth", api = domain_users::AuthApiDoc),
        (path = "/employees", api = domain_users::ApiDoc),
        (path = "/employees", api = domain_scores::EmployeeScoresApiDoc),
        (path = "/trainers", api = domain_users::ApiDoc),
        (path = "/managers", api = domain_users::ApiDoc),
        (path = "/skills", api = domain_skills::ApiDoc),
        (path = "/scores", api = domain_scores::ApiDoc),
        (path = "/learning-paths", api = domain_learning::ApiDoc),
        (path = "/notifications", api = crate::api::notifications::ApiDoc)
    ),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;
