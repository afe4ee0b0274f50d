//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub biography: String,
    pub birth_date: Option<NaiveDate>,
    pub website: Option<String>,
}

impl Author {
    /// "First Last", as shown in listings
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Create author request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub biography: String,
    pub birth_date: Option<NaiveDate>,
    #[validate(length(max = 255), url(message = "Invalid website URL"))]
    pub website: Option<String>,
}

impl CreateAuthor {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            biography: String::new(),
            birth_date: None,
            website: None,
        }
    }
}

/// Author name search parameters (API)
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuthorSearchQuery {
    /// Substring matched against first and last name, case-insensitive
    pub q: String,
}
