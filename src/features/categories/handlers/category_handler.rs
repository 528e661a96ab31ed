use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::ValidJson;
use crate::features::auth::AuthenticatedAdmin;
use crate::features::categories::dtos::{
    CategoryNodeDto, CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
    UpdateCategoryOrderDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, MessageDto};

/// List all categories
///
/// Returns the category forest; each category carries its children.
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Category tree", body = ApiResponse<Vec<CategoryNodeDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryNodeDto>>>> {
    let categories = service.list().await?;
    Ok(Json(ApiResponse::success(Some(categories), None, None)))
}

/// Get category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Create a category
///
/// Slug, level and order index are computed server-side when omitted.
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or invalid parent"),
        (status = 401, description = "Authentication required"),
        (status = 409, description = "No unique slug could be allocated")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "categories"
)]
pub async fn create_category(
    admin: AuthenticatedAdmin,
    State(service): State<Arc<CategoryService>>,
    ValidJson(dto): ValidJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {

    tracing::debug!("Admin {} creating category '{}'", admin.username, dto.name);

    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category), None, None)),
    ))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category id")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or invalid parent"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Slug already exists")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "categories"
)]
pub async fn update_category(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i32>,
    ValidJson(dto): ValidJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Delete a category
///
/// Child categories and their posts/articles are removed with it.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = i32, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<MessageDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Category not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "categories"
)]
pub async fn delete_category(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageDto>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::message("Category deleted successfully")))
}

/// Update category display order
///
/// All entries are applied in one transaction.
#[utoipa::path(
    put,
    path = "/api/categories/update-order",
    request_body = UpdateCategoryOrderDto,
    responses(
        (status = 200, description = "Order updated", body = ApiResponse<MessageDto>),
        (status = 400, description = "Empty batch"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Unknown category in batch")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "categories"
)]
pub async fn update_category_order(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<CategoryService>>,
    ValidJson(dto): ValidJson<UpdateCategoryOrderDto>,
) -> Result<Json<ApiResponse<MessageDto>>> {
    service.reorder(dto.categories).await?;
    Ok(Json(ApiResponse::message("Category order updated successfully")))
}
