use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{
    AuthorResponse, BookResponse, CreateAuthorRequest, CreateBookRequest, ErrorResponse,
    HealthResponse, UpdateAuthorRequest, UpdateBookRequest,
};

/// OpenAPI documentation for the Bookstore API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookstore API",
        version = "0.1.0",
        description = "REST API for managing books and authors with role-based access control.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Books", description = "Book catalogue endpoints"),
        (name = "Authors", description = "Author endpoints")
    ),
    paths(
        crate::handlers::get_books,
        crate::handlers::get_book,
        crate::handlers::create_book,
        crate::handlers::update_book,
        crate::handlers::delete_book,
        crate::handlers::get_authors,
        crate::handlers::get_author,
        crate::handlers::create_author,
        crate::handlers::update_author,
        crate::handlers::delete_author,
        crate::routes::health_check
    ),
    components(
        schemas(
            CreateBookRequest,
            UpdateBookRequest,
            BookResponse,
            CreateAuthorRequest,
            UpdateAuthorRequest,
            AuthorResponse,
            ErrorResponse,
            HealthResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Security configuration for Bearer token authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT issued by the identity provider"))
                        .build(),
                ),
            );
        }
    }
}
