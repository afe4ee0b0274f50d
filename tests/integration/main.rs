//! Integration tests.
//!
//! `api_tests` drive the router in-process. Tests that need PostgreSQL are
//! `#[ignore]`d; run them with `DATABASE_URL=... cargo test -- --ignored`.

mod api_tests;
mod catalog_tests;

use libris_server::{
    config::{AppConfig, CatalogConfig},
    repository::Repository,
    services::Services,
    AppState,
};
use sqlx::PgPool;
use std::sync::Arc;

pub fn services(pool: PgPool) -> Services {
    Services::new(Repository::new(pool), CatalogConfig::default())
}

pub fn state(pool: PgPool) -> AppState {
    AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(services(pool)),
    }
}
