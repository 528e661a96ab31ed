use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::ValidJson;
use crate::features::auth::AuthenticatedAdmin;
use crate::features::footer_content::dtos::{FooterContentResponseDto, UpdateFooterContentDto};
use crate::features::footer_content::services::FooterContentService;
use crate::shared::types::ApiResponse;

/// Get footer content
#[utoipa::path(
    get,
    path = "/api/footer-content",
    responses(
        (status = 200, description = "Footer content", body = ApiResponse<FooterContentResponseDto>),
        (status = 404, description = "No footer content stored")
    ),
    tag = "footer-content"
)]
pub async fn get_footer_content(
    State(service): State<Arc<FooterContentService>>,
) -> Result<Json<ApiResponse<FooterContentResponseDto>>> {
    let footer = service.get().await?;
    Ok(Json(ApiResponse::success(Some(footer), None, None)))
}

/// Replace footer content
#[utoipa::path(
    put,
    path = "/api/footer-content",
    request_body = UpdateFooterContentDto,
    responses(
        (status = 200, description = "Footer content updated", body = ApiResponse<FooterContentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "No footer content stored")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "footer-content"
)]
pub async fn update_footer_content(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<FooterContentService>>,
    ValidJson(dto): ValidJson<UpdateFooterContentDto>,
) -> Result<Json<ApiResponse<FooterContentResponseDto>>> {

    let footer = service.update(dto).await?;
    Ok(Json(ApiResponse::success(Some(footer), None, None)))
}
