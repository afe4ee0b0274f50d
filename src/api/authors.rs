//! Author endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorSearchQuery, CreateAuthor},
    AppState,
};

/// List all authors, ordered by last then first name
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "All authors", body = Vec<Author>)
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.get_all().await?;
    Ok(Json(authors))
}

/// Search authors by first or last name
#[utoipa::path(
    get,
    path = "/authors/search",
    tag = "authors",
    params(AuthorSearchQuery),
    responses(
        (status = 200, description = "Matching authors", body = Vec<Author>)
    )
)]
pub async fn search_authors(
    State(state): State<AppState>,
    Query(query): Query<AuthorSearchQuery>,
) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.search(&query.q).await?;
    Ok(Json(authors))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Author>> {
    let author = state
        .services
        .authors
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))?;
    Ok(Json(author))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    Json(data): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let author = state.services.authors.create(data).await?;
    Ok((StatusCode::CREATED, Json(author)))
}
