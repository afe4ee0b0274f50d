//! Content catalog service

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgConnection;
use validator::Validate;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{
        author::Author,
        category::Category,
        content::{Content, ContentDetails, ContentQuery, ContentSearch, CreateContent},
        enums::{ContentStatus, ContentType},
        extension::{CreateArticle, CreateBook, CreateMagazine, CreateMultimedia, ExtensionData},
    },
    repository::{content::escape_like, Repository},
};

/// Upper bound for any list limit
pub const MAX_LIMIT: i64 = 500;

fn check_limit(limit: i64) -> AppResult<()> {
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {}, got {}",
            MAX_LIMIT, limit
        )));
    }
    Ok(())
}

/// Turn API search parameters into a repository filter. A blank query
/// means browse: no text condition at all.
pub fn resolve_search(query: &ContentQuery, default_limit: i64) -> AppResult<ContentSearch> {
    let limit = query.limit.unwrap_or(default_limit);
    check_limit(limit)?;

    let pattern = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(|q| format!("%{}%", escape_like(q)));

    let language = query
        .language
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from);

    Ok(ContentSearch {
        pattern,
        content_type: query.content_type,
        available_only: query.available_only.unwrap_or(true),
        language,
        author_id: query.author_id,
        category_id: query.category_id,
        limit,
    })
}

/// Largest value a `NUMERIC(12,2)` column holds, exclusive
const FILE_SIZE_BOUND: i64 = 10_000_000_000;

/// File sizes are stored with two decimal places and ten integer digits
fn check_file_size(size: Option<Decimal>) -> AppResult<()> {
    let Some(size) = size else {
        return Ok(());
    };
    if size.is_sign_negative() && !size.is_zero() {
        return Err(AppError::Validation(format!(
            "file_size_mb must not be negative, got {}",
            size
        )));
    }
    if size >= Decimal::from(FILE_SIZE_BOUND) {
        return Err(AppError::Validation(format!(
            "file_size_mb must be below {}, got {}",
            FILE_SIZE_BOUND, size
        )));
    }
    if size.normalize().scale() > 2 {
        return Err(AppError::Validation(format!(
            "file_size_mb allows at most two decimal places, got {}",
            size
        )));
    }
    Ok(())
}

fn check_new_content(content: &CreateContent, extension: &ExtensionData) -> AppResult<()> {
    content.validate()?;
    extension.validate()?;
    if let ExtensionData::Multimedia(media) = extension {
        check_file_size(media.file_size_mb)?;
    }
    Ok(())
}

/// Keep the first occurrence of every id
fn dedup_ids(ids: &[i32]) -> Vec<i32> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(id) {
            seen.push(*id);
        }
    }
    seen
}

#[derive(Clone)]
pub struct ContentService {
    repository: Repository,
    limits: CatalogConfig,
}

impl ContentService {
    pub fn new(repository: Repository, limits: CatalogConfig) -> Self {
        Self { repository, limits }
    }

    /// Search content by title or description, newest first
    pub async fn search(&self, query: &ContentQuery) -> AppResult<Vec<Content>> {
        let filter = resolve_search(query, self.limits.search_limit)?;
        tracing::debug!(?filter, "Content search");
        self.repository.content.search(&filter).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Content>> {
        self.repository.content.get_by_id(id).await
    }

    /// Newest books. `None` uses the configured default.
    pub async fn get_books(&self, limit: Option<i64>) -> AppResult<Vec<Content>> {
        let limit = limit.unwrap_or(self.limits.books_limit);
        check_limit(limit)?;
        self.repository.content.list_by_type(ContentType::Book, limit).await
    }

    /// Content plus authors, categories and the extension row of its type
    pub async fn get_with_details(&self, id: i32) -> AppResult<Option<ContentDetails>> {
        let Some(content) = self.repository.content.get_by_id(id).await? else {
            return Ok(None);
        };

        let authors = self.repository.content.get_authors(id).await?;
        let categories = self.repository.content.get_categories(id).await?;
        let extended_info = self
            .repository
            .content
            .get_extended_info(id, content.content_type)
            .await?;

        if extended_info.is_none() {
            tracing::warn!(
                "Content id={} ({}) has no extension row",
                id,
                content.content_type
            );
        }

        Ok(Some(ContentDetails {
            content,
            authors,
            categories,
            extended_info,
        }))
    }

    pub async fn get_authors_for(&self, id: i32) -> AppResult<Vec<Author>> {
        self.repository.content.get_authors(id).await
    }

    pub async fn get_categories_for(&self, id: i32) -> AppResult<Vec<Category>> {
        self.repository.content.get_categories(id).await
    }

    pub async fn create_book(
        &self,
        content: CreateContent,
        book: CreateBook,
        author_ids: &[i32],
        category_ids: &[i32],
    ) -> AppResult<Content> {
        self.create_content(content, ExtensionData::Book(book), author_ids, category_ids)
            .await
    }

    pub async fn create_article(
        &self,
        content: CreateContent,
        article: CreateArticle,
        author_ids: &[i32],
        category_ids: &[i32],
    ) -> AppResult<Content> {
        self.create_content(content, ExtensionData::Article(article), author_ids, category_ids)
            .await
    }

    pub async fn create_magazine(
        &self,
        content: CreateContent,
        magazine: CreateMagazine,
        author_ids: &[i32],
        category_ids: &[i32],
    ) -> AppResult<Content> {
        self.create_content(content, ExtensionData::Magazine(magazine), author_ids, category_ids)
            .await
    }

    pub async fn create_multimedia(
        &self,
        content: CreateContent,
        multimedia: CreateMultimedia,
        author_ids: &[i32],
        category_ids: &[i32],
    ) -> AppResult<Content> {
        self.create_content(
            content,
            ExtensionData::Multimedia(multimedia),
            author_ids,
            category_ids,
        )
        .await
    }

    /// Create a content row, its extension row and its author/category links
    /// in one transaction. The extension variant decides the content type.
    /// On any failure nothing is kept and the original error is returned.
    pub async fn create_content(
        &self,
        content: CreateContent,
        extension: ExtensionData,
        author_ids: &[i32],
        category_ids: &[i32],
    ) -> AppResult<Content> {
        check_new_content(&content, &extension)?;

        let content_type = extension.content_type();
        let mut tx = self.repository.begin().await?;

        let written = self
            .write_content(&mut tx, &content, &extension, author_ids, category_ids)
            .await;

        match written {
            Ok(created) => {
                tx.commit().await?;
                tracing::info!(
                    "Created {} id={} \"{}\"",
                    content_type,
                    created.id,
                    created.title
                );
                Ok(created)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!("Rollback after failed create also failed: {}", rollback_err);
                }
                tracing::warn!("Create {} \"{}\" rolled back: {}", content_type, content.title, e);
                Err(e)
            }
        }
    }

    /// Validate and write a content item on a caller-owned connection.
    /// Committing or rolling back is left to the caller.
    pub async fn create_content_in(
        &self,
        conn: &mut PgConnection,
        content: &CreateContent,
        extension: &ExtensionData,
        author_ids: &[i32],
        category_ids: &[i32],
    ) -> AppResult<Content> {
        check_new_content(content, extension)?;
        self.write_content(conn, content, extension, author_ids, category_ids)
            .await
    }

    async fn write_content(
        &self,
        conn: &mut PgConnection,
        content: &CreateContent,
        extension: &ExtensionData,
        author_ids: &[i32],
        category_ids: &[i32],
    ) -> AppResult<Content> {
        let content_type = extension.content_type();
        if let Some(requested) = content.content_type {
            if requested != content_type {
                tracing::debug!(
                    "Requested content type {} replaced by {} from extension data",
                    requested,
                    content_type
                );
            }
        }

        let author_ids = dedup_ids(author_ids);
        let category_ids = dedup_ids(category_ids);

        let repo = &self.repository.content;
        let created = repo.insert(&mut *conn, content, content_type).await?;
        repo.insert_extension(&mut *conn, created.id, extension).await?;
        repo.link_authors(&mut *conn, created.id, &author_ids).await?;
        repo.link_categories(&mut *conn, created.id, &category_ids).await?;
        tracing::debug!(
            "Wrote {} id={} with {} authors, {} categories",
            content_type,
            created.id,
            author_ids.len(),
            category_ids.len()
        );
        Ok(created)
    }

    /// Set the status of a content item. Any status can follow any other.
    /// Returns false, writing nothing, when the id does not exist.
    pub async fn update_status(&self, id: i32, status: ContentStatus) -> AppResult<bool> {
        let updated = self.repository.content.update_status(id, status).await?;
        if updated {
            tracing::info!("Content id={} status set to {}", id, status);
        }
        Ok(updated)
    }

    /// Available items per content type. Every type is present, zero included.
    pub async fn count_available_by_type(&self) -> AppResult<BTreeMap<ContentType, i64>> {
        let mut counts = BTreeMap::new();
        for content_type in ContentType::ALL {
            let count = self
                .repository
                .content
                .count_by_type_and_status(content_type, ContentStatus::Available)
                .await?;
            counts.insert(content_type, count);
        }
        Ok(counts)
    }

    /// Content created within the last `days` days, newest first
    pub async fn get_recent(&self, days: Option<i64>, limit: Option<i64>) -> AppResult<Vec<Content>> {
        let days = days.unwrap_or(self.limits.recent_days);
        let limit = limit.unwrap_or(self.limits.recent_limit);
        if days < 0 {
            return Err(AppError::Validation("days must not be negative".to_string()));
        }
        check_limit(limit)?;

        let since = Duration::try_days(days)
            .and_then(|window| Utc::now().checked_sub_signed(window))
            .ok_or_else(|| AppError::Validation(format!("days out of range: {}", days)))?;
        self.repository.content.list_created_since(since, limit).await
    }
}
