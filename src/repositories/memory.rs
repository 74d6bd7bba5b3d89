//! In-memory catalog of books and authors.

use std::collections::BTreeMap;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::RwLock;

use crate::models::{Author, Book, Entity};

use super::{Repository, RepositoryError};

#[derive(Debug)]
struct CatalogState {
    books: BTreeMap<i64, Book>,
    authors: BTreeMap<i64, Author>,
    next_book_id: i64,
    next_author_id: i64,
}

impl CatalogState {
    fn unknown_author(&self, author_ids: &[i64]) -> Option<i64> {
        author_ids
            .iter()
            .copied()
            .find(|id| !self.authors.contains_key(id))
    }

    /// Author with `book_ids` filled in from the books that link to it.
    fn linked_author(&self, author: &Author) -> Author {
        Author {
            book_ids: self
                .books
                .values()
                .filter(|book| book.author_ids.contains(&author.id))
                .map(|book| book.id)
                .collect(),
            ..author.clone()
        }
    }
}

fn insert_new<T: Entity>(items: &mut BTreeMap<i64, T>, next_id: &mut i64, entity: &mut T) -> i64 {
    entity.set_id(*next_id);
    *next_id += 1;
    items.insert(entity.id(), entity.clone());
    entity.id()
}

fn normalized_links(book: &Book) -> Book {
    let mut book = book.clone();
    book.author_ids.sort_unstable();
    book.author_ids.dedup();
    book
}

/// Books and authors held in one map pair behind a single lock.
///
/// The book side owns the links: a book may only name stored authors,
/// an author's `book_ids` is derived on every read, and deleting an author
/// unlinks it from every book. Ids come from per-type counters that never
/// go backwards, so a deleted id is never handed out again.
#[derive(Debug)]
pub struct MemoryCatalog {
    state: RwLock<CatalogState>,
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CatalogState {
                books: BTreeMap::new(),
                authors: BTreeMap::new(),
                next_book_id: 1,
                next_author_id: 1,
            }),
        }
    }

    /// Seed the catalog. Ids are kept; links are taken as given.
    #[cfg(test)]
    pub fn with_data(books: Vec<Book>, authors: Vec<Author>) -> Self {
        let next_book_id = books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        let next_author_id = authors.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        Self {
            state: RwLock::new(CatalogState {
                books: books
                    .iter()
                    .map(|book| (book.id, normalized_links(book)))
                    .collect(),
                authors: authors.into_iter().map(|a| (a.id, a)).collect(),
                next_book_id,
                next_author_id,
            }),
        }
    }
}

#[async_trait]
impl Repository<Book> for MemoryCatalog {
    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError> {
        Ok(self.state.read().await.books.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, RepositoryError> {
        Ok(self.state.read().await.books.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.state.read().await.books.contains_key(&id))
    }

    async fn create(&self, book: &mut Book) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        if let Some(author_id) = state.unknown_author(&book.author_ids) {
            warn!("Memory catalog: book insert names unknown author {}", author_id);
            return Ok(false);
        }
        *book = normalized_links(book);
        let CatalogState {
            books,
            next_book_id,
            ..
        } = &mut *state;
        let id = insert_new(books, next_book_id, book);
        debug!("Memory catalog: inserted book {}", id);
        Ok(true)
    }

    async fn update(&self, book: &Book) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        if let Some(author_id) = state.unknown_author(&book.author_ids) {
            warn!(
                "Memory catalog: update of book {} names unknown author {}",
                book.id, author_id
            );
            return Ok(false);
        }
        match state.books.get_mut(&book.id) {
            Some(stored) => {
                *stored = normalized_links(book);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, book: &Book) -> Result<bool, RepositoryError> {
        Ok(self.state.write().await.books.remove(&book.id).is_some())
    }
}

#[async_trait]
impl Repository<Author> for MemoryCatalog {
    async fn find_all(&self) -> Result<Vec<Author>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .authors
            .values()
            .map(|author| state.linked_author(author))
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .authors
            .get(&id)
            .map(|author| state.linked_author(author)))
    }

    async fn exists(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.state.read().await.authors.contains_key(&id))
    }

    async fn create(&self, author: &mut Author) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        author.book_ids.clear();
        let CatalogState {
            authors,
            next_author_id,
            ..
        } = &mut *state;
        let id = insert_new(authors, next_author_id, author);
        debug!("Memory catalog: inserted author {}", id);
        Ok(true)
    }

    async fn update(&self, author: &Author) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        match state.authors.get_mut(&author.id) {
            Some(stored) => {
                stored.first_name = author.first_name.clone();
                stored.last_name = author.last_name.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, author: &Author) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        if state.authors.remove(&author.id).is_none() {
            return Ok(false);
        }
        for book in state.books.values_mut() {
            book.author_ids.retain(|id| *id != author.id);
        }
        debug!("Memory catalog: deleted author {} and its links", author.id);
        Ok(true)
    }
}
