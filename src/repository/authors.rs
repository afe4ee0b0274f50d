//! Authors repository

use sqlx::{PgExecutor, Pool, Postgres};

use crate::{
    error::AppResult,
    models::author::{Author, CreateAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// All authors, ordered by last then first name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, last_name, biography, birth_date, website \
             FROM authors ORDER BY last_name, first_name, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Authors whose first or last name matches an ILIKE pattern
    pub async fn search(&self, pattern: &str) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, last_name, biography, birth_date, website
            FROM authors
            WHERE first_name ILIKE $1 OR last_name ILIKE $1
            ORDER BY last_name, first_name, id
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, last_name, biography, birth_date, website \
             FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(author)
    }

    /// Create an author. Names are not unique.
    pub async fn create<'e, E: PgExecutor<'e>>(&self, executor: E, data: &CreateAuthor) -> AppResult<Author> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, last_name, biography, birth_date, website)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, last_name, biography, birth_date, website
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.biography)
        .bind(data.birth_date)
        .bind(&data.website)
        .fetch_one(executor)
        .await?;
        Ok(author)
    }
}
