use crate::api::schemas::{ErrorDetail, ErrorResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Session Pipeline API",
        version = "1.0.0",
        description = "API documentation for the session/media/payments pipeline",
        contact(
            name = "API Support",
            email = "support@example.com"
        )
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorDetail,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "sessions", description = "Session lifecycle endpoints"),
        (name = "media", description = "Media upload endpoints"),
        (name = "me", description = "Principal self-service endpoints"),
        (name = "payments", description = "Payment and credit endpoints"),
        (name = "search", description = "Semantic search endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            )
        }
    }
}
