use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::ValidJson;
use crate::features::articles::dtos::{
    ArticleIdentifier, ArticleQueryParams, ArticleResponseDto, UpsertArticleDto,
};
use crate::features::articles::services::ArticleService;
use crate::features::auth::AuthenticatedAdmin;
use crate::shared::types::{ApiResponse, MessageDto, Meta};

/// List articles
///
/// Supports filtering by category, published flag and tag, with limit/offset
/// pagination. `meta.total` holds the number of matching articles.
#[utoipa::path(
    get,
    path = "/api/articles",
    params(ArticleQueryParams),
    responses(
        (status = 200, description = "Page of articles", body = ApiResponse<Vec<ArticleResponseDto>>),
    ),
    tag = "articles"
)]
pub async fn list_articles(
    State(service): State<Arc<ArticleService>>,
    Query(params): Query<ArticleQueryParams>,
) -> Result<Json<ApiResponse<Vec<ArticleResponseDto>>>> {
    let (articles, total) = service.list(&params).await?;
    Ok(Json(ApiResponse::success(
        Some(articles),
        None,
        Some(Meta { total }),
    )))
}

/// Get article by id or slug
///
/// Reads by slug count as a view; reads by numeric id do not.
#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    params(
        ("id" = String, Path, description = "Article id or slug")
    ),
    responses(
        (status = 200, description = "Article found", body = ApiResponse<ArticleResponseDto>),
        (status = 404, description = "Article not found")
    ),
    tag = "articles"
)]
pub async fn get_article(
    State(service): State<Arc<ArticleService>>,
    Path(identifier): Path<String>,
) -> Result<Json<ApiResponse<ArticleResponseDto>>> {
    let article = service.get(ArticleIdentifier::parse(&identifier)).await?;
    Ok(Json(ApiResponse::success(Some(article), None, None)))
}

/// Create an article
///
/// The authenticated admin becomes the author.
#[utoipa::path(
    post,
    path = "/api/articles",
    request_body = UpsertArticleDto,
    responses(
        (status = 201, description = "Article created", body = ApiResponse<ArticleResponseDto>),
        (status = 400, description = "Validation error or invalid category"),
        (status = 401, description = "Authentication required"),
        (status = 409, description = "Slug already exists")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "articles"
)]
pub async fn create_article(
    admin: AuthenticatedAdmin,
    State(service): State<Arc<ArticleService>>,
    ValidJson(dto): ValidJson<UpsertArticleDto>,
) -> Result<(StatusCode, Json<ApiResponse<ArticleResponseDto>>)> {

    let article = service.create(admin.id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(article), None, None)),
    ))
}

/// Replace an article
#[utoipa::path(
    put,
    path = "/api/articles/{id}",
    params(
        ("id" = i32, Path, description = "Article id")
    ),
    request_body = UpsertArticleDto,
    responses(
        (status = 200, description = "Article updated", body = ApiResponse<ArticleResponseDto>),
        (status = 400, description = "Validation error or invalid category"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Article not found"),
        (status = 409, description = "Slug already exists")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "articles"
)]
pub async fn update_article(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<ArticleService>>,
    Path(id): Path<i32>,
    ValidJson(dto): ValidJson<UpsertArticleDto>,
) -> Result<Json<ApiResponse<ArticleResponseDto>>> {

    let article = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(article), None, None)))
}

/// Delete an article
#[utoipa::path(
    delete,
    path = "/api/articles/{id}",
    params(
        ("id" = i32, Path, description = "Article id")
    ),
    responses(
        (status = 200, description = "Article deleted", body = ApiResponse<MessageDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Article not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "articles"
)]
pub async fn delete_article(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<ArticleService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageDto>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::message("Article deleted successfully")))
}
