use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::ValidJson;
use crate::features::auth::AuthenticatedAdmin;
use crate::features::seo_settings::dtos::{SeoSettingsResponseDto, UpdateSeoSettingsDto};
use crate::features::seo_settings::services::SeoSettingsService;
use crate::shared::types::ApiResponse;

/// Get global SEO settings
#[utoipa::path(
    get,
    path = "/api/seo-settings",
    responses(
        (status = 200, description = "Stored or default SEO settings", body = ApiResponse<SeoSettingsResponseDto>)
    ),
    tag = "seo-settings"
)]
pub async fn get_seo_settings(
    State(service): State<Arc<SeoSettingsService>>,
) -> Result<Json<ApiResponse<SeoSettingsResponseDto>>> {
    let settings = service.get().await?;
    Ok(Json(ApiResponse::success(Some(settings), None, None)))
}

/// Create or update global SEO settings
#[utoipa::path(
    put,
    path = "/api/seo-settings",
    request_body = UpdateSeoSettingsDto,
    responses(
        (status = 200, description = "SEO settings saved", body = ApiResponse<SeoSettingsResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "seo-settings"
)]
pub async fn update_seo_settings(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<SeoSettingsService>>,
    ValidJson(dto): ValidJson<UpdateSeoSettingsDto>,
) -> Result<Json<ApiResponse<SeoSettingsResponseDto>>> {

    let settings = service.upsert(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(settings),
        Some("SEO settings saved".to_string()),
        None,
    )))
}
