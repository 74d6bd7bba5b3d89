use async_trait::async_trait;
use log::debug;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::models::Book;
use crate::repositories::{Repository, RepositoryError};

use super::refused_write;

const SELECT_BOOKS: &str = r#"
    SELECT
        b.id,
        b.title,
        b.year,
        b.isbn,
        b.summary,
        b.image,
        COALESCE(
            ARRAY_AGG(ba.author_id ORDER BY ba.author_id) FILTER (WHERE ba.author_id IS NOT NULL),
            '{}'
        ) AS author_ids
    FROM books b
    LEFT JOIN book_authors ba ON ba.book_id = b.id
"#;

#[derive(Debug, FromRow)]
struct BookRow {
    id: i64,
    title: String,
    year: i32,
    isbn: String,
    summary: Option<String>,
    image: Option<String>,
    author_ids: Vec<i64>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            year: row.year,
            isbn: row.isbn,
            summary: row.summary,
            image: row.image,
            author_ids: row.author_ids,
        }
    }
}

/// Repository for the `books` table and the book side of `book_authors`.
#[derive(Debug, Clone)]
pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn replace_authors(
        tx: &mut Transaction<'_, Postgres>,
        book_id: i64,
        author_ids: &[i64],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM book_authors WHERE book_id = $1")
            .bind(book_id)
            .execute(&mut **tx)
            .await?;

        if !author_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO book_authors (book_id, author_id)
                SELECT $1, UNNEST($2::BIGINT[])
                "#,
            )
            .bind(book_id)
            .bind(author_ids)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    async fn insert(&self, book: &Book) -> Result<i64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO books (title, year, isbn, summary, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(book.year)
        .bind(&book.isbn)
        .bind(&book.summary)
        .bind(&book.image)
        .fetch_one(&mut *tx)
        .await?;

        Self::replace_authors(&mut tx, id, &book.author_ids).await?;
        tx.commit().await?;

        Ok(id)
    }

    async fn replace(&self, book: &Book) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE books
            SET title = $2, year = $3, isbn = $4, summary = $5, image = $6
            WHERE id = $1
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(book.year)
        .bind(&book.isbn)
        .bind(&book.summary)
        .bind(&book.image)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        Self::replace_authors(&mut tx, book.id, &book.author_ids).await?;
        tx.commit().await?;

        Ok(true)
    }
}

#[async_trait]
impl Repository<Book> for PostgresBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError> {
        let rows: Vec<BookRow> =
            sqlx::query_as(&format!("{SELECT_BOOKS} GROUP BY b.id ORDER BY b.id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, RepositoryError> {
        debug!("Repository: Finding book by ID: {}", id);
        let row: Option<BookRow> =
            sqlx::query_as(&format!("{SELECT_BOOKS} WHERE b.id = $1 GROUP BY b.id"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Book::from))
    }

    async fn exists(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn create(&self, book: &mut Book) -> Result<bool, RepositoryError> {
        match self.insert(book).await {
            Ok(id) => {
                debug!("Repository: Inserted book {}", id);
                book.id = id;
                Ok(true)
            }
            Err(err) => refused_write(err, "book insert"),
        }
    }

    async fn update(&self, book: &Book) -> Result<bool, RepositoryError> {
        debug!("Repository: Updating book {}", book.id);
        match self.replace(book).await {
            Ok(updated) => Ok(updated),
            Err(err) => refused_write(err, "book update"),
        }
    }

    async fn delete(&self, book: &Book) -> Result<bool, RepositoryError> {
        debug!("Repository: Deleting book {}", book.id);
        let deleted = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(book.id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }
}
