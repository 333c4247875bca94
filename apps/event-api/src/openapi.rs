//! OpenAPI documentation configuration

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

/// Registers the JWT bearer scheme referenced by `bearer_auth` security
/// requirements on protected endpoints.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Event Platform API",
        version = "0.1.0",
        description = "MongoDB-based REST API for managing events, venues, categories, reviews and users",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::users::my_events,
        crate::api::events::event_reviews,
        crate::api::events::event_rating
    ),
    nest(
        (path = "/api/auth", api = domain_users::auth_handlers::ApiDoc),
        (path = "/api/users", api = domain_users::handlers::ApiDoc),
        (path = "/api/events", api = domain_events::ApiDoc),
        (path = "/api/venues", api = domain_venues::ApiDoc),
        (path = "/api/categories", api = domain_categories::ApiDoc),
        (path = "/api/reviews", api = domain_reviews::ApiDoc)
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and token endpoints"),
        (name = "Users", description = "User profile and administration endpoints"),
        (name = "Events", description = "Event management and registration endpoints"),
        (name = "Venues", description = "Venue management endpoints"),
        (name = "Categories", description = "Event category management endpoints"),
        (name = "Reviews", description = "Event review endpoints")
    )
)]
pub struct ApiDoc;
