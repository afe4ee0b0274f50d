//! Category endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CreateCategory},
    AppState,
};

/// List all categories by name
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>)
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.categories.get_all().await?;
    Ok(Json(categories))
}

/// Categories without a parent
#[utoipa::path(
    get,
    path = "/categories/roots",
    tag = "categories",
    responses(
        (status = 200, description = "Top-level categories", body = Vec<Category>)
    )
)]
pub async fn list_root_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.categories.get_roots().await?;
    Ok(Json(categories))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Category>> {
    let category = state
        .services
        .categories
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;
    Ok(Json(category))
}

/// Direct children of a category
#[utoipa::path(
    get,
    path = "/categories/{id}/children",
    tag = "categories",
    params(("id" = i32, Path, description = "Parent category ID")),
    responses(
        (status = 200, description = "Child categories", body = Vec<Category>)
    )
)]
pub async fn list_child_categories(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.categories.get_children(id).await?;
    Ok(Json(categories))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid input or unknown parent"),
        (status = 409, description = "Category name already exists")
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(data): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = state.services.categories.create(data).await?;
    Ok((StatusCode::CREATED, Json(category)))
}
