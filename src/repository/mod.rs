//! Repository layer for database operations.
//!
//! `Repository` is the storage gateway: it owns the connection pool, hands
//! out scoped transactions and runs the schema migration. The per-domain
//! repositories share the same pool.

pub mod authors;
pub mod categories;
pub mod content;

use sqlx::{Pool, Postgres, Transaction};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub content: content::ContentRepository,
    pub authors: authors::AuthorsRepository,
    pub categories: categories::CategoriesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            content: content::ContentRepository::new(pool.clone()),
            authors: authors::AuthorsRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            pool,
        }
    }

    /// Start a transaction. Dropping it without `commit` rolls it back.
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }

    /// Create or upgrade the schema. Safe to call on every start.
    pub async fn create_tables(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Round trip to the database, used by the readiness check
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
