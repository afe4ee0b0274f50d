//! Shared catalog enums, stored as text columns

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// ContentType
// ---------------------------------------------------------------------------

/// Media type of a catalog entry. Fixed when the entry is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Book,
    Article,
    Magazine,
    Multimedia,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Book,
        ContentType::Article,
        ContentType::Magazine,
        ContentType::Multimedia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Book => "book",
            ContentType::Article => "article",
            ContentType::Magazine => "magazine",
            ContentType::Multimedia => "multimedia",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "book" => Ok(ContentType::Book),
            "article" => Ok(ContentType::Article),
            "magazine" => Ok(ContentType::Magazine),
            "multimedia" => Ok(ContentType::Multimedia),
            _ => Err(format!("Invalid content type: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for ContentType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for ContentType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for ContentType {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

// ---------------------------------------------------------------------------
// ContentStatus
// ---------------------------------------------------------------------------

/// Circulation status of a catalog entry.
///
/// Any status may be set from any other; there is no checkout or
/// reservation workflow behind these values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    #[default]
    Available,
    CheckedOut,
    Reserved,
    Maintenance,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Available => "available",
            ContentStatus::CheckedOut => "checked_out",
            ContentStatus::Reserved => "reserved",
            ContentStatus::Maintenance => "maintenance",
        }
    }
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(ContentStatus::Available),
            "checked_out" => Ok(ContentStatus::CheckedOut),
            "reserved" => Ok(ContentStatus::Reserved),
            "maintenance" => Ok(ContentStatus::Maintenance),
            _ => Err(format!("Invalid content status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for ContentStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for ContentStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for ContentStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}
