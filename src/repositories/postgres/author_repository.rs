use async_trait::async_trait;
use log::debug;
use sqlx::{FromRow, PgPool};

use crate::models::Author;
use crate::repositories::{Repository, RepositoryError};

use super::refused_write;

const SELECT_AUTHORS: &str = r#"
    SELECT
        a.id,
        a.first_name,
        a.last_name,
        COALESCE(
            ARRAY_AGG(ba.book_id ORDER BY ba.book_id) FILTER (WHERE ba.book_id IS NOT NULL),
            '{}'
        ) AS book_ids
    FROM authors a
    LEFT JOIN book_authors ba ON ba.author_id = a.id
"#;

#[derive(Debug, FromRow)]
struct AuthorRow {
    id: i64,
    first_name: String,
    last_name: String,
    book_ids: Vec<i64>,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            book_ids: row.book_ids,
        }
    }
}

/// Repository for the `authors` table. Book links are read-only here.
#[derive(Debug, Clone)]
pub struct PostgresAuthorRepository {
    pool: PgPool,
}

impl PostgresAuthorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Author> for PostgresAuthorRepository {
    async fn find_all(&self) -> Result<Vec<Author>, RepositoryError> {
        let rows: Vec<AuthorRow> =
            sqlx::query_as(&format!("{SELECT_AUTHORS} GROUP BY a.id ORDER BY a.id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, RepositoryError> {
        debug!("Repository: Finding author by ID: {}", id);
        let row: Option<AuthorRow> =
            sqlx::query_as(&format!("{SELECT_AUTHORS} WHERE a.id = $1 GROUP BY a.id"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Author::from))
    }

    async fn exists(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn create(&self, author: &mut Author) -> Result<bool, RepositoryError> {
        let inserted: Result<i64, sqlx::Error> = sqlx::query_scalar(
            r#"
            INSERT INTO authors (first_name, last_name)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(id) => {
                debug!("Repository: Inserted author {}", id);
                author.id = id;
                Ok(true)
            }
            Err(err) => refused_write(err, "author insert"),
        }
    }

    async fn update(&self, author: &Author) -> Result<bool, RepositoryError> {
        debug!("Repository: Updating author {}", author.id);
        let updated = sqlx::query(
            r#"
            UPDATE authors
            SET first_name = $2, last_name = $3
            WHERE id = $1
            "#,
        )
        .bind(author.id)
        .bind(&author.first_name)
        .bind(&author.last_name)
        .execute(&self.pool)
        .await;

        match updated {
            Ok(result) => Ok(result.rows_affected() > 0),
            Err(err) => refused_write(err, "author update"),
        }
    }

    async fn delete(&self, author: &Author) -> Result<bool, RepositoryError> {
        debug!("Repository: Deleting author {}", author.id);
        let deleted = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(author.id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }
}
