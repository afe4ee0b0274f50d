//! Author service

use sqlx::PgConnection;
use validator::Validate;

use crate::{
    error::AppResult,
    models::author::{Author, CreateAuthor},
    repository::{content::escape_like, Repository},
};

#[derive(Clone)]
pub struct AuthorService {
    repository: Repository,
}

impl AuthorService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All authors sorted by (last name, first name)
    pub async fn get_all(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    /// Case-insensitive substring match on first or last name.
    /// An empty query matches everyone.
    pub async fn search(&self, query: &str) -> AppResult<Vec<Author>> {
        let pattern = format!("%{}%", escape_like(query.trim()));
        self.repository.authors.search(&pattern).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        self.repository.authors.get_by_id(id).await
    }

    /// Create an author. Duplicate names are allowed.
    pub async fn create(&self, data: CreateAuthor) -> AppResult<Author> {
        data.validate()?;
        let author = self.repository.authors.create(&self.repository.pool, &data).await?;
        tracing::info!("Created author id={} {}", author.id, author.full_name());
        Ok(author)
    }

    /// Same as [`Self::create`] on a caller-owned connection
    pub async fn create_in(&self, conn: &mut PgConnection, data: &CreateAuthor) -> AppResult<Author> {
        data.validate()?;
        self.repository.authors.create(conn, data).await
    }
}
