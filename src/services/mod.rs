//! Business logic services

pub mod authors;
pub mod categories;
pub mod content;
pub mod seed;

use crate::{config::CatalogConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub content: content::ContentService,
    pub authors: authors::AuthorService,
    pub categories: categories::CategoryService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, catalog_config: CatalogConfig) -> Self {
        Self {
            content: content::ContentService::new(repository.clone(), catalog_config),
            authors: authors::AuthorService::new(repository.clone()),
            categories: categories::CategoryService::new(repository.clone()),
            repository,
        }
    }
}
