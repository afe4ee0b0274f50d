//! Categories repository

use sqlx::{PgExecutor, Pool, Postgres};

use crate::{
    error::AppResult,
    models::category::{Category, CreateCategory},
};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, parent_id FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Top-level categories
    pub async fn list_roots(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, parent_id FROM categories \
             WHERE parent_id IS NULL ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Direct children of a category
    pub async fn list_children(&self, parent_id: i32) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, parent_id FROM categories \
             WHERE parent_id = $1 ORDER BY name",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, parent_id FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    /// Insert a category. A duplicate name fails on the unique constraint and
    /// an unknown parent on the foreign key; both come back as database errors.
    pub async fn create<'e, E: PgExecutor<'e>>(&self, executor: E, data: &CreateCategory) -> AppResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, parent_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, parent_id
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.parent_id)
        .fetch_one(executor)
        .await?;
        Ok(category)
    }
}
