use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::ValidJson;
use crate::features::auth::AuthenticatedAdmin;
use crate::features::posts::dtos::{PostQueryParams, PostResponseDto, UpsertPostDto};
use crate::features::posts::services::PostService;
use crate::shared::types::{ApiResponse, MessageDto};

/// List posts
#[utoipa::path(
    get,
    path = "/api/posts",
    params(PostQueryParams),
    responses(
        (status = 200, description = "List of posts", body = ApiResponse<Vec<PostResponseDto>>),
    ),
    tag = "posts"
)]
pub async fn list_posts(
    State(service): State<Arc<PostService>>,
    Query(params): Query<PostQueryParams>,
) -> Result<Json<ApiResponse<Vec<PostResponseDto>>>> {
    let posts = service.list(&params).await?;
    Ok(Json(ApiResponse::success(Some(posts), None, None)))
}

/// Get post by id
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(
        ("id" = i32, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = ApiResponse<PostResponseDto>),
        (status = 400, description = "Invalid post id"),
        (status = 404, description = "Post not found")
    ),
    tag = "posts"
)]
pub async fn get_post(
    State(service): State<Arc<PostService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PostResponseDto>>> {
    let post = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(post), None, None)))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = UpsertPostDto,
    responses(
        (status = 201, description = "Post created", body = ApiResponse<PostResponseDto>),
        (status = 400, description = "Validation error or invalid category"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "posts"
)]
pub async fn create_post(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<PostService>>,
    ValidJson(dto): ValidJson<UpsertPostDto>,
) -> Result<(StatusCode, Json<ApiResponse<PostResponseDto>>)> {

    let post = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(post), None, None)),
    ))
}

/// Replace a post
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    params(
        ("id" = i32, Path, description = "Post id")
    ),
    request_body = UpsertPostDto,
    responses(
        (status = 200, description = "Post updated", body = ApiResponse<PostResponseDto>),
        (status = 400, description = "Validation error or invalid category"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Post not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "posts"
)]
pub async fn update_post(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<PostService>>,
    Path(id): Path<i32>,
    ValidJson(dto): ValidJson<UpsertPostDto>,
) -> Result<Json<ApiResponse<PostResponseDto>>> {

    let post = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(post), None, None)))
}

/// Delete a post
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(
        ("id" = i32, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post deleted", body = ApiResponse<MessageDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Post not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "posts"
)]
pub async fn delete_post(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<PostService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageDto>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::message("Post deleted successfully")))
}
