//! PostgreSQL repositories built on a shared `sqlx` connection pool.

mod author_repository;
mod book_repository;

pub use author_repository::PostgresAuthorRepository;
pub use book_repository::PostgresBookRepository;

use log::{info, warn};
use sqlx::error::ErrorKind;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::RepositoryError;

/// Open a connection pool and bring the schema up to date.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, RepositoryError> {
    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database schema is up to date");

    Ok(pool)
}

/// Turn constraint violations into a refused write (`Ok(false)`); anything
/// else stays a fault.
fn refused_write(err: sqlx::Error, context: &str) -> Result<bool, RepositoryError> {
    if let sqlx::Error::Database(db_err) = &err {
        if matches!(
            db_err.kind(),
            ErrorKind::ForeignKeyViolation
                | ErrorKind::UniqueViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation
        ) {
            warn!("Repository: {} rejected by constraint: {}", context, db_err);
            return Ok(false);
        }
    }
    Err(err.into())
}
