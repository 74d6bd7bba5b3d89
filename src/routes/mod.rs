use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

use crate::handlers;
use crate::middleware::AuthMiddleware;
use crate::models::HealthResponse;
use crate::openapi::ApiDoc;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api-docs/openapi.json", web::get().to(openapi_json))
        .service(
            web::scope("/api")
                // Health check
                .route("/health", web::get().to(health_check))
                // Book routes (protected)
                .service(
                    web::scope("/books")
                        .wrap(AuthMiddleware)
                        .route("", web::get().to(handlers::get_books))
                        .route("", web::post().to(handlers::create_book))
                        .route("/{id}", web::get().to(handlers::get_book))
                        .route("/{id}", web::put().to(handlers::update_book))
                        .route("/{id}", web::delete().to(handlers::delete_book)),
                )
                // Author routes (protected)
                .service(
                    web::scope("/authors")
                        .wrap(AuthMiddleware)
                        .route("", web::get().to(handlers::get_authors))
                        .route("", web::post().to(handlers::create_author))
                        .route("/{id}", web::get().to(handlers::get_author))
                        .route("/{id}", web::put().to(handlers::update_author))
                        .route("/{id}", web::delete().to(handlers::delete_author)),
                ),
        );
}

/// Health check
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
    })
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
