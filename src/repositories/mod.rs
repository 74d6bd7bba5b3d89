//! Repository layer for database operations.
//!
//! Handlers talk to storage only through [`Repository`], so the same request
//! pipeline runs against PostgreSQL in production and an in-memory map in
//! tests or with `STORAGE_BACKEND=memory`.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Author, Book};

pub use memory::MemoryCatalog;
pub use postgres::{PostgresAuthorRepository, PostgresBookRepository};

/// Unexpected data-access fault. Never shown to API clients.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// CRUD primitives over one entity type.
///
/// Mutations report a refused write (missing row, violated constraint) as
/// `Ok(false)`; `Err` is reserved for faults the caller cannot act on.
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Return every stored entity ordered by id.
    async fn find_all(&self) -> Result<Vec<T>, RepositoryError>;

    /// Find an entity by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepositoryError>;

    /// Check whether an entity with the given id exists.
    async fn exists(&self, id: i64) -> Result<bool, RepositoryError>;

    /// Persist a new entity. On success the assigned id is written back into `entity`.
    async fn create(&self, entity: &mut T) -> Result<bool, RepositoryError>;

    /// Replace all mutable fields of an existing entity.
    async fn update(&self, entity: &T) -> Result<bool, RepositoryError>;

    /// Remove an entity.
    async fn delete(&self, entity: &T) -> Result<bool, RepositoryError>;
}

pub type BookRepositoryArc = Arc<dyn Repository<Book>>;
pub type AuthorRepositoryArc = Arc<dyn Repository<Author>>;
