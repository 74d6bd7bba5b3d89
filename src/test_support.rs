//! Fixtures shared by the HTTP-level tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_web::http::header;
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::config::CONFIG;
use crate::constants::ROLE_ADMIN;
use crate::models::{Author, Book, Claims, Entity};
use crate::repositories::{MemoryCatalog, Repository, RepositoryError};

/// Build an initialised actix test service over the real route table.
///
/// Pass one catalog to serve both entity types, or one repository per type.
/// Repositories must be `Arc`s; they are coerced to the trait objects the
/// handlers extract.
macro_rules! init_app {
    ($catalog:expr) => {{
        let catalog = $catalog;
        $crate::test_support::init_app!(catalog.clone(), catalog)
    }};
    ($books:expr, $authors:expr) => {
        $crate::test_support::init_app!($books, $authors, $crate::config::AccessPolicies::default())
    };
    ($books:expr, $authors:expr, $policies:expr) => {{
        let books: $crate::repositories::BookRepositoryArc = $books;
        let authors: $crate::repositories::AuthorRepositoryArc = $authors;
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::from(books))
                .app_data(actix_web::web::Data::from(authors))
                .app_data(actix_web::web::Data::new($policies))
                .configure($crate::routes::configure_routes),
        )
        .await
    }};
}

pub(crate) use init_app;

/// Sign a token the way the identity provider would.
pub fn token_for(role: &str) -> String {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: format!("{}-caller", role.to_lowercase()),
        role: role.to_string(),
        exp: now + 3600,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(CONFIG.jwt_secret.as_bytes()),
    )
    .expect("test token encodes")
}

pub fn admin_token() -> String {
    token_for(ROLE_ADMIN)
}

pub fn reader_token() -> String {
    token_for("Reader")
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub fn sample_book(title: &str) -> Book {
    Book {
        id: 0,
        title: title.to_string(),
        year: 1965,
        isbn: "0-441-17271-7".to_string(),
        summary: Some("Desert planet politics".to_string()),
        image: None,
        author_ids: vec![1],
    }
}

pub fn sample_author(first_name: &str, last_name: &str) -> Author {
    Author {
        id: 0,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        book_ids: Vec::new(),
    }
}

/// Give entities ids 1..=n in order.
pub fn numbered<T: Entity>(items: Vec<T>) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, mut item)| {
            item.set_id(i as i64 + 1);
            item
        })
        .collect()
}

/// Shared catalog seeded with the given records, ids kept as given.
pub fn catalog(books: Vec<Book>, authors: Vec<Author>) -> Arc<MemoryCatalog> {
    Arc::new(MemoryCatalog::with_data(books, authors))
}

/// Empty shared catalog.
pub fn empty_catalog() -> Arc<MemoryCatalog> {
    Arc::new(MemoryCatalog::new())
}

/// How a [`FaultyRepository`] misbehaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Behave like the wrapped catalog; only count calls.
    None,
    /// Reads succeed, every mutation returns `Ok(false)`.
    RejectWrites,
    /// Every call fails with a storage fault.
    Unavailable,
}

/// Wraps a [`MemoryCatalog`] to inject failures and count calls.
///
/// Serves either entity type, so it can stand in for the book or the author
/// repository while the other side uses the same catalog directly.
#[derive(Debug)]
pub struct FaultyRepository {
    inner: Arc<MemoryCatalog>,
    fault: Fault,
    lookups: AtomicUsize,
    writes: AtomicUsize,
}

impl FaultyRepository {
    pub fn new(inner: Arc<MemoryCatalog>, fault: Fault) -> Arc<Self> {
        Arc::new(Self {
            inner,
            fault,
            lookups: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        })
    }

    /// Number of `exists`/`find_by_id` calls seen.
    pub fn lookup_calls(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Number of `create`/`update`/`delete` calls seen.
    pub fn write_calls(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        match self.fault {
            Fault::Unavailable => Err(RepositoryError::Database(sqlx::Error::PoolTimedOut)),
            _ => Ok(()),
        }
    }

    fn record_write(&self) -> Result<bool, RepositoryError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.fault != Fault::RejectWrites)
    }
}

#[async_trait]
impl<T> Repository<T> for FaultyRepository
where
    T: Send + Sync + 'static,
    MemoryCatalog: Repository<T>,
{
    async fn find_all(&self) -> Result<Vec<T>, RepositoryError> {
        self.check_available()?;
        Repository::<T>::find_all(&*self.inner).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Repository::<T>::find_by_id(&*self.inner, id).await
    }

    async fn exists(&self, id: i64) -> Result<bool, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Repository::<T>::exists(&*self.inner, id).await
    }

    async fn create(&self, entity: &mut T) -> Result<bool, RepositoryError> {
        if !self.record_write()? {
            return Ok(false);
        }
        Repository::<T>::create(&*self.inner, entity).await
    }

    async fn update(&self, entity: &T) -> Result<bool, RepositoryError> {
        if !self.record_write()? {
            return Ok(false);
        }
        Repository::<T>::update(&*self.inner, entity).await
    }

    async fn delete(&self, entity: &T) -> Result<bool, RepositoryError> {
        if !self.record_write()? {
            return Ok(false);
        }
        Repository::<T>::delete(&*self.inner, entity).await
    }
}
