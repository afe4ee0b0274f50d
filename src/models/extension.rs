//! Type-specific extension records.
//!
//! Every content row owns exactly one extension row in the table matching its
//! `content_type`. `ExtensionData` is what callers hand in on creation,
//! `ExtendedInfo` is what comes back out of the detail view.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::ContentType;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub content_id: i32,
    pub page_count: Option<i32>,
    pub publisher: String,
    pub edition: String,
    /// paperback, hardcover, ebook, audiobook
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Article {
    pub id: i32,
    pub content_id: i32,
    pub journal_name: String,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub page_range: Option<String>,
    pub doi: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Magazine {
    pub id: i32,
    pub content_id: i32,
    pub issue_number: String,
    /// weekly, monthly, quarterly...
    pub frequency: String,
    pub publisher: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Multimedia {
    pub id: i32,
    pub content_id: i32,
    /// dvd, cd, blu-ray, digital...
    pub media_type: String,
    pub duration_minutes: Option<i32>,
    pub file_format: Option<String>,
    pub file_size_mb: Option<Decimal>,
}

/// Extension row loaded for a content item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "content_type", rename_all = "snake_case")]
pub enum ExtendedInfo {
    Book(Book),
    Article(Article),
    Magazine(Magazine),
    Multimedia(Multimedia),
}

fn default_book_format() -> String {
    "paperback".to_string()
}

fn default_frequency() -> String {
    "monthly".to_string()
}

/// Create book details request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(range(min = 1))]
    pub page_count: Option<i32>,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub publisher: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub edition: String,
    #[serde(default = "default_book_format")]
    #[validate(length(max = 50))]
    pub format: String,
}

impl Default for CreateBook {
    fn default() -> Self {
        Self {
            page_count: None,
            publisher: String::new(),
            edition: String::new(),
            format: default_book_format(),
        }
    }
}

impl CreateBook {
    pub fn published_by(publisher: impl Into<String>) -> Self {
        Self {
            publisher: publisher.into(),
            ..Default::default()
        }
    }
}

/// Create article details request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateArticle {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub journal_name: String,
    #[validate(length(max = 20))]
    pub volume: Option<String>,
    #[validate(length(max = 20))]
    pub issue: Option<String>,
    #[validate(length(max = 50))]
    pub page_range: Option<String>,
    #[validate(length(max = 100))]
    pub doi: Option<String>,
}

/// Create magazine details request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMagazine {
    #[validate(length(min = 1, max = 50, message = "Issue number is required"))]
    pub issue_number: String,
    #[serde(default = "default_frequency")]
    #[validate(length(max = 50))]
    pub frequency: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub publisher: String,
}

/// Create multimedia details request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMultimedia {
    #[validate(length(min = 1, max = 50, message = "Media type is required"))]
    pub media_type: String,
    #[validate(range(min = 0))]
    pub duration_minutes: Option<i32>,
    #[validate(length(max = 20))]
    pub file_format: Option<String>,
    pub file_size_mb: Option<Decimal>,
}

/// Type-specific data for a new content item. The variant decides the
/// content type of the row it is attached to.
#[derive(Debug, Clone)]
pub enum ExtensionData {
    Book(CreateBook),
    Article(CreateArticle),
    Magazine(CreateMagazine),
    Multimedia(CreateMultimedia),
}

impl ExtensionData {
    pub fn content_type(&self) -> ContentType {
        match self {
            ExtensionData::Book(_) => ContentType::Book,
            ExtensionData::Article(_) => ContentType::Article,
            ExtensionData::Magazine(_) => ContentType::Magazine,
            ExtensionData::Multimedia(_) => ContentType::Multimedia,
        }
    }

    pub fn validate(&self) -> Result<(), validator::ValidationErrors> {
        match self {
            ExtensionData::Book(b) => b.validate(),
            ExtensionData::Article(a) => a.validate(),
            ExtensionData::Magazine(m) => m.validate(),
            ExtensionData::Multimedia(m) => m.validate(),
        }
    }
}
