use crate::core::error::Result;
use crate::core::extractor::ValidJson;
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto};
use crate::features::auth::services::AuthService;
use crate::shared::types::{ApiResponse, MessageDto};
use axum::{extract::State, Json};
use std::sync::Arc;

/// Login with username and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    ValidJson(dto): ValidJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {

    let response = service.login(dto).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Logout
///
/// Tokens are stateless; the client simply discards its token.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<MessageDto>)
    ),
    tag = "auth"
)]
pub async fn logout() -> Json<ApiResponse<MessageDto>> {
    Json(ApiResponse::message("Logged out successfully"))
}
