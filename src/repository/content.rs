//! Content repository: catalog entries, their extension rows and junctions.
//!
//! Write methods that take a `&mut PgConnection` are meant to be called with
//! an open transaction so that a content row, its extension row and its
//! junction rows land together or not at all.

use chrono::{DateTime, Utc};
use sqlx::{types::Json, PgConnection, Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        author::Author,
        category::Category,
        content::{Content, ContentSearch, CreateContent},
        enums::{ContentStatus, ContentType},
        extension::{Article, Book, ExtendedInfo, ExtensionData, Magazine, Multimedia},
    },
};

const CONTENT_COLUMNS: &str = "id, title, description, content_type, status, isbn, language, \
     publication_date, created_at, updated_at, tags, metadata";

/// Escape LIKE wildcards so user input is matched literally
pub fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the search statement. Placeholders are numbered in the same order
/// `ContentRepository::search` binds the values.
pub fn search_sql(filter: &ContentSearch) -> String {
    let mut conditions = Vec::new();
    let mut idx = 1;

    if filter.pattern.is_some() {
        conditions.push(format!("(title ILIKE ${idx} OR description ILIKE ${idx})"));
        idx += 1;
    }
    if filter.content_type.is_some() {
        conditions.push(format!("content_type = ${idx}"));
        idx += 1;
    }
    if filter.available_only {
        conditions.push(format!("status = ${idx}"));
        idx += 1;
    }
    if filter.language.is_some() {
        conditions.push(format!("LOWER(language) = LOWER(${idx})"));
        idx += 1;
    }
    if filter.author_id.is_some() {
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM content_authors ca \
             WHERE ca.content_id = content.id AND ca.author_id = ${idx})"
        ));
        idx += 1;
    }
    if filter.category_id.is_some() {
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM content_categories cc \
             WHERE cc.content_id = content.id AND cc.category_id = ${idx})"
        ));
        idx += 1;
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {} ", conditions.join(" AND "))
    };

    format!(
        "SELECT {CONTENT_COLUMNS} FROM content {where_clause}\
         ORDER BY created_at DESC, id DESC LIMIT ${idx}"
    )
}

#[derive(Clone)]
pub struct ContentRepository {
    pool: Pool<Postgres>,
}

impl ContentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Content>> {
        let query = format!("SELECT {CONTENT_COLUMNS} FROM content WHERE id = $1");
        let content = sqlx::query_as::<_, Content>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(content)
    }

    /// Newest entries of one content type
    pub async fn list_by_type(&self, content_type: ContentType, limit: i64) -> AppResult<Vec<Content>> {
        let query = format!(
            "SELECT {CONTENT_COLUMNS} FROM content WHERE content_type = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2"
        );
        let rows = sqlx::query_as::<_, Content>(&query)
            .bind(content_type)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Entries created at or after `since`, newest first
    pub async fn list_created_since(&self, since: DateTime<Utc>, limit: i64) -> AppResult<Vec<Content>> {
        let query = format!(
            "SELECT {CONTENT_COLUMNS} FROM content WHERE created_at >= $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2"
        );
        let rows = sqlx::query_as::<_, Content>(&query)
            .bind(since)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn count_by_type_and_status(
        &self,
        content_type: ContentType,
        status: ContentStatus,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM content WHERE content_type = $1 AND status = $2",
        )
        .bind(content_type)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Load the extension row from the table matching `content_type`
    pub async fn get_extended_info(
        &self,
        content_id: i32,
        content_type: ContentType,
    ) -> AppResult<Option<ExtendedInfo>> {
        let info = match content_type {
            ContentType::Book => sqlx::query_as::<_, Book>(
                "SELECT id, content_id, page_count, publisher, edition, format \
                 FROM books WHERE content_id = $1",
            )
            .bind(content_id)
            .fetch_optional(&self.pool)
            .await?
            .map(ExtendedInfo::Book),
            ContentType::Article => sqlx::query_as::<_, Article>(
                "SELECT id, content_id, journal_name, volume, issue, page_range, doi \
                 FROM articles WHERE content_id = $1",
            )
            .bind(content_id)
            .fetch_optional(&self.pool)
            .await?
            .map(ExtendedInfo::Article),
            ContentType::Magazine => sqlx::query_as::<_, Magazine>(
                "SELECT id, content_id, issue_number, frequency, publisher \
                 FROM magazines WHERE content_id = $1",
            )
            .bind(content_id)
            .fetch_optional(&self.pool)
            .await?
            .map(ExtendedInfo::Magazine),
            ContentType::Multimedia => sqlx::query_as::<_, Multimedia>(
                "SELECT id, content_id, media_type, duration_minutes, file_format, file_size_mb \
                 FROM multimedia WHERE content_id = $1",
            )
            .bind(content_id)
            .fetch_optional(&self.pool)
            .await?
            .map(ExtendedInfo::Multimedia),
        };
        Ok(info)
    }

    /// Authors linked through the content_authors junction table
    pub async fn get_authors(&self, content_id: i32) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT a.id, a.first_name, a.last_name, a.biography, a.birth_date, a.website
            FROM content_authors ca
            JOIN authors a ON a.id = ca.author_id
            WHERE ca.content_id = $1
            ORDER BY a.last_name, a.first_name, a.id
            "#,
        )
        .bind(content_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    /// Categories linked through the content_categories junction table
    pub async fn get_categories(&self, content_id: i32) -> AppResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT c.id, c.name, c.description, c.parent_id
            FROM content_categories cc
            JOIN categories c ON c.id = cc.category_id
            WHERE cc.content_id = $1
            ORDER BY c.name, c.id
            "#,
        )
        .bind(content_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    // =========================================================================
    // SEARCH
    // =========================================================================

    pub async fn search(&self, filter: &ContentSearch) -> AppResult<Vec<Content>> {
        let query = search_sql(filter);
        let mut builder = sqlx::query_as::<_, Content>(&query);

        if let Some(ref pattern) = filter.pattern {
            builder = builder.bind(pattern);
        }
        if let Some(content_type) = filter.content_type {
            builder = builder.bind(content_type);
        }
        if filter.available_only {
            builder = builder.bind(ContentStatus::Available);
        }
        if let Some(ref language) = filter.language {
            builder = builder.bind(language);
        }
        if let Some(author_id) = filter.author_id {
            builder = builder.bind(author_id);
        }
        if let Some(category_id) = filter.category_id {
            builder = builder.bind(category_id);
        }
        builder = builder.bind(filter.limit);

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Set the status and touch `updated_at`. Returns false if no row has `id`.
    pub async fn update_status(&self, id: i32, status: ContentStatus) -> AppResult<bool> {
        let result = sqlx::query("UPDATE content SET status = $1, updated_at = $2 WHERE id = $3")
            .bind(status)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert the base content row
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        data: &CreateContent,
        content_type: ContentType,
    ) -> AppResult<Content> {
        let now = Utc::now();
        let query = format!(
            r#"
            INSERT INTO content (
                title, description, content_type, status, isbn, language,
                publication_date, created_at, updated_at, tags, metadata
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {CONTENT_COLUMNS}
            "#
        );
        let content = sqlx::query_as::<_, Content>(&query)
            .bind(&data.title)
            .bind(&data.description)
            .bind(content_type)
            .bind(ContentStatus::Available)
            .bind(&data.isbn)
            .bind(&data.language)
            .bind(data.publication_date)
            .bind(now)
            .bind(now)
            .bind(Json(&data.tags))
            .bind(Json(&data.metadata))
            .fetch_one(&mut *conn)
            .await?;
        Ok(content)
    }

    /// Insert the extension row for `content_id` into the table matching the variant
    pub async fn insert_extension(
        &self,
        conn: &mut PgConnection,
        content_id: i32,
        extension: &ExtensionData,
    ) -> AppResult<()> {
        match extension {
            ExtensionData::Book(book) => {
                sqlx::query(
                    "INSERT INTO books (content_id, page_count, publisher, edition, format) \
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(content_id)
                .bind(book.page_count)
                .bind(&book.publisher)
                .bind(&book.edition)
                .bind(&book.format)
                .execute(&mut *conn)
                .await?;
            }
            ExtensionData::Article(article) => {
                sqlx::query(
                    "INSERT INTO articles (content_id, journal_name, volume, issue, page_range, doi) \
                     VALUES ($1, $2, $3, $4, $5, $6)",
                )
                .bind(content_id)
                .bind(&article.journal_name)
                .bind(&article.volume)
                .bind(&article.issue)
                .bind(&article.page_range)
                .bind(&article.doi)
                .execute(&mut *conn)
                .await?;
            }
            ExtensionData::Magazine(magazine) => {
                sqlx::query(
                    "INSERT INTO magazines (content_id, issue_number, frequency, publisher) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(content_id)
                .bind(&magazine.issue_number)
                .bind(&magazine.frequency)
                .bind(&magazine.publisher)
                .execute(&mut *conn)
                .await?;
            }
            ExtensionData::Multimedia(media) => {
                sqlx::query(
                    "INSERT INTO multimedia (content_id, media_type, duration_minutes, file_format, file_size_mb) \
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(content_id)
                .bind(&media.media_type)
                .bind(media.duration_minutes)
                .bind(&media.file_format)
                .bind(media.file_size_mb)
                .execute(&mut *conn)
                .await?;
            }
        }
        Ok(())
    }

    /// One content_authors row per author id
    pub async fn link_authors(
        &self,
        conn: &mut PgConnection,
        content_id: i32,
        author_ids: &[i32],
    ) -> AppResult<()> {
        for author_id in author_ids {
            sqlx::query("INSERT INTO content_authors (content_id, author_id) VALUES ($1, $2)")
                .bind(content_id)
                .bind(author_id)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }

    /// One content_categories row per category id
    pub async fn link_categories(
        &self,
        conn: &mut PgConnection,
        content_id: i32,
        category_ids: &[i32],
    ) -> AppResult<()> {
        for category_id in category_ids {
            sqlx::query("INSERT INTO content_categories (content_id, category_id) VALUES ($1, $2)")
                .bind(content_id)
                .bind(category_id)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }
}
