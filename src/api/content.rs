//! Content (catalog) endpoints

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        category::Category,
        content::{Content, ContentDetails, ContentQuery, CreateContent, LimitQuery, RecentQuery, UpdateStatus},
        enums::ContentType,
        extension::{CreateArticle, CreateBook, CreateMagazine, CreateMultimedia},
    },
    AppState,
};

fn content_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Content with id {} not found", id))
}

/// Create book request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookRequest {
    pub content: CreateContent,
    #[serde(default)]
    pub book: CreateBook,
    #[serde(default)]
    pub author_ids: Vec<i32>,
    #[serde(default)]
    pub category_ids: Vec<i32>,
}

/// Create article request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub content: CreateContent,
    #[serde(default)]
    pub article: CreateArticle,
    #[serde(default)]
    pub author_ids: Vec<i32>,
    #[serde(default)]
    pub category_ids: Vec<i32>,
}

/// Create magazine request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMagazineRequest {
    pub content: CreateContent,
    pub magazine: CreateMagazine,
    #[serde(default)]
    pub author_ids: Vec<i32>,
    #[serde(default)]
    pub category_ids: Vec<i32>,
}

/// Create multimedia request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMultimediaRequest {
    pub content: CreateContent,
    pub multimedia: CreateMultimedia,
    #[serde(default)]
    pub author_ids: Vec<i32>,
    #[serde(default)]
    pub category_ids: Vec<i32>,
}

/// Search or browse content
#[utoipa::path(
    get,
    path = "/content",
    tag = "content",
    params(ContentQuery),
    responses(
        (status = 200, description = "Matching content, newest first", body = Vec<Content>),
        (status = 400, description = "Invalid limit")
    )
)]
pub async fn search_content(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> AppResult<Json<Vec<Content>>> {
    let results = state.services.content.search(&query).await?;
    Ok(Json(results))
}

/// Newest books
#[utoipa::path(
    get,
    path = "/content/books",
    tag = "content",
    params(LimitQuery),
    responses(
        (status = 200, description = "Books, newest first", body = Vec<Content>)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Vec<Content>>> {
    let books = state.services.content.get_books(query.limit).await?;
    Ok(Json(books))
}

/// Recently added content
#[utoipa::path(
    get,
    path = "/content/recent",
    tag = "content",
    params(RecentQuery),
    responses(
        (status = 200, description = "Content added in the last days", body = Vec<Content>)
    )
)]
pub async fn list_recent(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> AppResult<Json<Vec<Content>>> {
    let recent = state.services.content.get_recent(query.days, query.limit).await?;
    Ok(Json(recent))
}

/// Available items per content type
#[utoipa::path(
    get,
    path = "/content/stats",
    tag = "content",
    responses(
        (status = 200, description = "Count of available items for every content type", body = BTreeMap<String, i64>)
    )
)]
pub async fn content_stats(
    State(state): State<AppState>,
) -> AppResult<Json<BTreeMap<ContentType, i64>>> {
    let counts = state.services.content.count_available_by_type().await?;
    Ok(Json(counts))
}

/// Get content by ID
#[utoipa::path(
    get,
    path = "/content/{id}",
    tag = "content",
    params(("id" = i32, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content", body = Content),
        (status = 404, description = "Content not found")
    )
)]
pub async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Content>> {
    let content = state
        .services
        .content
        .get_by_id(id)
        .await?
        .ok_or_else(|| content_not_found(id))?;
    Ok(Json(content))
}

/// Get content with authors, categories and type-specific details
#[utoipa::path(
    get,
    path = "/content/{id}/details",
    tag = "content",
    params(("id" = i32, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Content details", body = ContentDetails),
        (status = 404, description = "Content not found")
    )
)]
pub async fn get_content_details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ContentDetails>> {
    let details = state
        .services
        .content
        .get_with_details(id)
        .await?
        .ok_or_else(|| content_not_found(id))?;
    Ok(Json(details))
}

/// Authors of a content item
#[utoipa::path(
    get,
    path = "/content/{id}/authors",
    tag = "content",
    params(("id" = i32, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Linked authors", body = Vec<Author>)
    )
)]
pub async fn get_content_authors(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.content.get_authors_for(id).await?;
    Ok(Json(authors))
}

/// Categories of a content item
#[utoipa::path(
    get,
    path = "/content/{id}/categories",
    tag = "content",
    params(("id" = i32, Path, description = "Content ID")),
    responses(
        (status = 200, description = "Linked categories", body = Vec<Category>)
    )
)]
pub async fn get_content_categories(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.content.get_categories_for(id).await?;
    Ok(Json(categories))
}

/// Change the status of a content item
#[utoipa::path(
    put,
    path = "/content/{id}/status",
    tag = "content",
    params(("id" = i32, Path, description = "Content ID")),
    request_body = UpdateStatus,
    responses(
        (status = 200, description = "Status updated", body = Content),
        (status = 404, description = "Content not found")
    )
)]
pub async fn update_content_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateStatus>,
) -> AppResult<Json<Content>> {
    let content_service = &state.services.content;
    if !content_service.update_status(id, request.status).await? {
        return Err(content_not_found(id));
    }
    let content = content_service
        .get_by_id(id)
        .await?
        .ok_or_else(|| content_not_found(id))?;
    Ok(Json(content))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/content/books",
    tag = "content",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created", body = Content),
        (status = 400, description = "Invalid input or unknown author/category")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(request): Json<CreateBookRequest>,
) -> AppResult<(StatusCode, Json<Content>)> {
    let created = state
        .services
        .content
        .create_book(request.content, request.book, &request.author_ids, &request.category_ids)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Create an article
#[utoipa::path(
    post,
    path = "/content/articles",
    tag = "content",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article created", body = Content),
        (status = 400, description = "Invalid input or unknown author/category")
    )
)]
pub async fn create_article(
    State(state): State<AppState>,
    Json(request): Json<CreateArticleRequest>,
) -> AppResult<(StatusCode, Json<Content>)> {
    let created = state
        .services
        .content
        .create_article(request.content, request.article, &request.author_ids, &request.category_ids)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Create a magazine issue
#[utoipa::path(
    post,
    path = "/content/magazines",
    tag = "content",
    request_body = CreateMagazineRequest,
    responses(
        (status = 201, description = "Magazine created", body = Content),
        (status = 400, description = "Invalid input or unknown author/category")
    )
)]
pub async fn create_magazine(
    State(state): State<AppState>,
    Json(request): Json<CreateMagazineRequest>,
) -> AppResult<(StatusCode, Json<Content>)> {
    let created = state
        .services
        .content
        .create_magazine(request.content, request.magazine, &request.author_ids, &request.category_ids)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Create a multimedia item
#[utoipa::path(
    post,
    path = "/content/multimedia",
    tag = "content",
    request_body = CreateMultimediaRequest,
    responses(
        (status = 201, description = "Multimedia item created", body = Content),
        (status = 400, description = "Invalid input or unknown author/category")
    )
)]
pub async fn create_multimedia(
    State(state): State<AppState>,
    Json(request): Json<CreateMultimediaRequest>,
) -> AppResult<(StatusCode, Json<Content>)> {
    let created = state
        .services
        .content
        .create_multimedia(
            request.content,
            request.multimedia,
            &request.author_ids,
            &request.category_ids,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}
