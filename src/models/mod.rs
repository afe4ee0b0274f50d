//! Data models for Libris

pub mod author;
pub mod category;
pub mod content;
pub mod enums;
pub mod extension;

// Re-export commonly used types
pub use author::{Author, CreateAuthor};
pub use category::{Category, CreateCategory};
pub use content::{Content, ContentDetails, ContentQuery, ContentSearch, CreateContent};
pub use enums::{ContentStatus, ContentType};
pub use extension::{
    Article, Book, CreateArticle, CreateBook, CreateMagazine, CreateMultimedia, ExtendedInfo,
    ExtensionData, Magazine, Multimedia,
};
