use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::ValidJson;
use crate::features::auth::AuthenticatedAdmin;
use crate::features::home_content::dtos::{HomeContentResponseDto, UpdateHomeContentDto};
use crate::features::home_content::services::HomeContentService;
use crate::shared::types::ApiResponse;

/// Get homepage content
#[utoipa::path(
    get,
    path = "/api/home-content",
    responses(
        (status = 200, description = "Homepage content", body = ApiResponse<HomeContentResponseDto>),
        (status = 404, description = "No homepage content stored")
    ),
    tag = "home-content"
)]
pub async fn get_home_content(
    State(service): State<Arc<HomeContentService>>,
) -> Result<Json<ApiResponse<HomeContentResponseDto>>> {
    let content = service.get().await?;
    Ok(Json(ApiResponse::success(Some(content), None, None)))
}

/// Replace homepage content
#[utoipa::path(
    put,
    path = "/api/home-content",
    request_body = UpdateHomeContentDto,
    responses(
        (status = 200, description = "Homepage content updated", body = ApiResponse<HomeContentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "No homepage content stored")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "home-content"
)]
pub async fn update_home_content(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<HomeContentService>>,
    ValidJson(dto): ValidJson<UpdateHomeContentDto>,
) -> Result<Json<ApiResponse<HomeContentResponseDto>>> {

    let content = service.update(dto).await?;
    Ok(Json(ApiResponse::success(Some(content), None, None)))
}
