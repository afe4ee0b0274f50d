//! Content (catalog entry) model and related types.
//!
//! A `Content` row is the base record shared by every media type. The
//! type-specific details live in one extension row (see [`super::extension`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::author::Author;
use super::category::Category;
use super::enums::{ContentStatus, ContentType};
use super::extension::ExtendedInfo;

/// Free-form metadata attached to a content item
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Full content model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Content {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub content_type: ContentType,
    pub status: ContentStatus,
    pub isbn: Option<String>,
    pub language: String,
    pub publication_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[schema(value_type = Vec<String>)]
    pub tags: Json<Vec<String>>,
    #[schema(value_type = Object)]
    pub metadata: Json<Metadata>,
}

/// Content with its authors, categories and type-specific details
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContentDetails {
    pub content: Content,
    pub authors: Vec<Author>,
    pub categories: Vec<Category>,
    /// Missing only if the extension row was never written
    pub extended_info: Option<ExtendedInfo>,
}

fn default_language() -> String {
    "English".to_string()
}

/// Base fields for a new content item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateContent {
    #[validate(length(min = 1, max = 500, message = "Title must be between 1 and 500 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    /// Overridden by the extension type on creation
    #[serde(default)]
    pub content_type: Option<ContentType>,
    #[validate(length(max = 20))]
    pub isbn: Option<String>,
    #[serde(default = "default_language")]
    #[validate(length(min = 1, max = 50))]
    pub language: String,
    pub publication_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub metadata: Metadata,
}

impl CreateContent {
    /// New content with only a title; everything else takes its default
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            content_type: None,
            isbn: None,
            language: default_language(),
            publication_date: None,
            tags: Vec::new(),
            metadata: Metadata::new(),
        }
    }
}

/// Status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatus {
    pub status: ContentStatus,
}

/// Content search parameters (API)
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ContentQuery {
    /// Substring matched against title and description, case-insensitive
    pub q: Option<String>,
    pub content_type: Option<ContentType>,
    /// Defaults to true
    pub available_only: Option<bool>,
    pub language: Option<String>,
    pub author_id: Option<i32>,
    pub category_id: Option<i32>,
    /// Defaults to 50
    pub limit: Option<i64>,
}

/// Resolved search filter handed to the repository
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSearch {
    /// Already wrapped in `%` with LIKE wildcards escaped
    pub pattern: Option<String>,
    pub content_type: Option<ContentType>,
    pub available_only: bool,
    pub language: Option<String>,
    pub author_id: Option<i32>,
    pub category_id: Option<i32>,
    pub limit: i64,
}

/// Recently added content parameters (API)
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentQuery {
    pub days: Option<i64>,
    pub limit: Option<i64>,
}

/// Limit-only parameters (API)
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}
