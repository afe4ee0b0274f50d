//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, categories, content, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.3.0",
        description = "Digital Library Catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Content
        content::search_content,
        content::list_books,
        content::list_recent,
        content::content_stats,
        content::get_content,
        content::get_content_details,
        content::get_content_authors,
        content::get_content_categories,
        content::update_content_status,
        content::create_book,
        content::create_article,
        content::create_magazine,
        content::create_multimedia,
        // Authors
        authors::list_authors,
        authors::search_authors,
        authors::get_author,
        authors::create_author,
        // Categories
        categories::list_categories,
        categories::list_root_categories,
        categories::get_category,
        categories::list_child_categories,
        categories::create_category,
    ),
    components(
        schemas(
            health::HealthResponse,
            crate::error::ErrorResponse,
            // Content
            crate::models::content::Content,
            crate::models::content::ContentDetails,
            crate::models::content::CreateContent,
            crate::models::content::UpdateStatus,
            crate::models::enums::ContentType,
            crate::models::enums::ContentStatus,
            content::CreateBookRequest,
            content::CreateArticleRequest,
            content::CreateMagazineRequest,
            content::CreateMultimediaRequest,
            // Extensions
            crate::models::extension::Book,
            crate::models::extension::Article,
            crate::models::extension::Magazine,
            crate::models::extension::Multimedia,
            crate::models::extension::ExtendedInfo,
            crate::models::extension::CreateBook,
            crate::models::extension::CreateArticle,
            crate::models::extension::CreateMagazine,
            crate::models::extension::CreateMultimedia,
            // Authors & categories
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::category::Category,
            crate::models::category::CreateCategory,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "content", description = "Catalog search, browsing and creation"),
        (name = "authors", description = "Author management"),
        (name = "categories", description = "Category hierarchy")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
