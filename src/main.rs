mod config;
mod constants;
mod errors;
mod handlers;
mod mappers;
mod middleware;
mod models;
mod openapi;
mod repositories;
mod routes;
mod utils;
mod validators;

#[cfg(test)]
mod test_support;

use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};

use crate::config::{StorageBackend, CONFIG};
use crate::repositories::{
    postgres, AuthorRepositoryArc, BookRepositoryArc, MemoryCatalog, PostgresAuthorRepository,
    PostgresBookRepository,
};

async fn build_repositories() -> io::Result<(BookRepositoryArc, AuthorRepositoryArc)> {
    match CONFIG.storage_backend {
        StorageBackend::Postgres => {
            let pool = postgres::connect(&CONFIG.database_url, CONFIG.database_max_connections)
                .await
                .map_err(|e| {
                    error!("Failed to initialise PostgreSQL storage: {}", e);
                    io::Error::new(io::ErrorKind::Other, e)
                })?;
            info!("Connected to PostgreSQL successfully!");
            let books: BookRepositoryArc = Arc::new(PostgresBookRepository::new(pool.clone()));
            let authors: AuthorRepositoryArc = Arc::new(PostgresAuthorRepository::new(pool));
            Ok((books, authors))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on shutdown");
            let catalog = Arc::new(MemoryCatalog::new());
            let books: BookRepositoryArc = catalog.clone();
            let authors: AuthorRepositoryArc = catalog;
            Ok((books, authors))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize environment variables and logger
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    info!("Storage backend: {}", CONFIG.storage_backend);
    let (books, authors) = build_repositories().await?;

    let book_repository = web::Data::from(books);
    let author_repository = web::Data::from(authors);
    let access_policies = web::Data::new(CONFIG.access);
    info!("Access policies: {:?}", CONFIG.access);

    // Start HTTP server
    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!("Starting server at http://{}", server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(book_repository.clone())
            .app_data(author_repository.clone())
            .app_data(access_policies.clone())
            .configure(routes::configure_routes)
    })
    .bind(&server_addr)?
    .run()
    .await
}
