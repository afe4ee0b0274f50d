//! Category service

use sqlx::PgConnection;
use validator::Validate;

use crate::{
    error::AppResult,
    models::category::{Category, CreateCategory},
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoryService {
    repository: Repository,
}

impl CategoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All categories sorted by name
    pub async fn get_all(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    /// Categories without a parent
    pub async fn get_roots(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list_roots().await
    }

    pub async fn get_children(&self, parent_id: i32) -> AppResult<Vec<Category>> {
        self.repository.categories.list_children(parent_id).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        self.repository.categories.get_by_id(id).await
    }

    /// Create a category. The new row can only point at an existing parent and
    /// categories are never re-parented, so no cycle can form here.
    pub async fn create(&self, data: CreateCategory) -> AppResult<Category> {
        data.validate()?;
        let category = self
            .repository
            .categories
            .create(&self.repository.pool, &data)
            .await?;
        tracing::info!(
            "Created category id={} \"{}\" (parent {:?})",
            category.id,
            category.name,
            category.parent_id
        );
        Ok(category)
    }

    /// Same as [`Self::create`] on a caller-owned connection
    pub async fn create_in(&self, conn: &mut PgConnection, data: &CreateCategory) -> AppResult<Category> {
        data.validate()?;
        self.repository.categories.create(conn, data).await
    }
}
