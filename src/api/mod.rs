//! API handlers for Libris REST endpoints

pub mod authors;
pub mod categories;
pub mod content;
pub mod health;
pub mod openapi;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Content
        .route("/content", get(content::search_content))
        .route("/content/books", get(content::list_books).post(content::create_book))
        .route("/content/articles", post(content::create_article))
        .route("/content/magazines", post(content::create_magazine))
        .route("/content/multimedia", post(content::create_multimedia))
        .route("/content/recent", get(content::list_recent))
        .route("/content/stats", get(content::content_stats))
        .route("/content/:id", get(content::get_content))
        .route("/content/:id/details", get(content::get_content_details))
        .route("/content/:id/authors", get(content::get_content_authors))
        .route("/content/:id/categories", get(content::get_content_categories))
        .route("/content/:id/status", put(content::update_content_status))
        // Authors
        .route("/authors", get(authors::list_authors).post(authors::create_author))
        .route("/authors/search", get(authors::search_authors))
        .route("/authors/:id", get(authors::get_author))
        // Categories
        .route("/categories", get(categories::list_categories).post(categories::create_category))
        .route("/categories/roots", get(categories::list_root_categories))
        .route("/categories/:id", get(categories::get_category))
        .route("/categories/:id/children", get(categories::list_child_categories))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
