use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap},
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::auth::AuthenticatedAdmin;
use crate::features::media::dtos::{
    HomepageMediaDto, HomepageUploadResponseDto, ReplaceMediaResponseDto, SvgUploadFormDto,
    SvgUploadResponseDto, UploadFormDto, UploadResponseDto,
};
use crate::features::media::models::{HomepageMediaType, MediaKind, UploadedFile};
use crate::features::media::services::MediaService;
use crate::shared::types::{ApiResponse, MessageDto};

const UPLOAD_FIELD: &str = "upload";
const SVG_FIELD: &str = "svg";

/// Public base URL of this server as seen by the client, honouring reverse proxy headers
pub fn base_url(headers: &HeaderMap) -> String {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let scheme = header_value("x-forwarded-proto").unwrap_or("http");
    let host = header_value("x-forwarded-host")
        .or_else(|| header_value(header::HOST.as_str()))
        .unwrap_or("localhost");

    format!("{}://{}", scheme, host)
}

/// Pull the named file part out of a multipart body, ignoring other fields
async fn read_file_field(multipart: &mut Multipart, field: &str) -> Result<UploadedFile> {
    while let Some(part) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        if part.name() != Some(field) {
            debug!("Ignoring multipart field: {:?}", part.name());
            continue;
        }

        let file_name = part.file_name().unwrap_or_default().to_string();
        let content_type = part.content_type().unwrap_or_default().to_string();
        let data = part.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;

        return Ok(UploadedFile {
            file_name,
            content_type,
            data: data.to_vec(),
        });
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}

/// Upload an image for the editor
///
/// Accepts multipart/form-data with the file in the `upload` field.
#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content = UploadFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = ApiResponse<UploadResponseDto>),
        (status = 400, description = "Missing file, wrong type or too large"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "media"
)]
pub async fn upload_image(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<MediaService>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponseDto>>> {
    let upload = read_file_field(&mut multipart, UPLOAD_FIELD).await?;
    let response = service
        .upload(MediaKind::Image, upload, &base_url(&headers))
        .await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Upload a video for the editor
#[utoipa::path(
    post,
    path = "/api/upload-video",
    request_body(content = UploadFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video stored", body = ApiResponse<UploadResponseDto>),
        (status = 400, description = "Missing file, wrong type or too large"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "media"
)]
pub async fn upload_video(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<MediaService>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponseDto>>> {
    let upload = read_file_field(&mut multipart, UPLOAD_FIELD).await?;
    let response = service
        .upload(MediaKind::Video, upload, &base_url(&headers))
        .await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Upload an SVG icon; the markup is echoed back for preview
#[utoipa::path(
    post,
    path = "/api/upload-svg-icon",
    request_body(content = SvgUploadFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Icon stored", body = ApiResponse<SvgUploadResponseDto>),
        (status = 400, description = "Missing file, not SVG or too large"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "media"
)]
pub async fn upload_svg_icon(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<MediaService>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<SvgUploadResponseDto>>> {
    let upload = read_file_field(&mut multipart, SVG_FIELD).await?;
    let response = service.upload_svg(upload, &base_url(&headers)).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// List homepage gallery media
#[utoipa::path(
    get,
    path = "/api/homepage/media",
    responses(
        (status = 200, description = "Image and video URLs", body = ApiResponse<HomepageMediaDto>)
    ),
    tag = "homepage"
)]
pub async fn list_homepage_media(
    State(service): State<Arc<MediaService>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<HomepageMediaDto>>> {
    let media = service.list_homepage(&base_url(&headers)).await?;
    Ok(Json(ApiResponse::success(Some(media), None, None)))
}

async fn upload_homepage(
    service: &MediaService,
    media_type: HomepageMediaType,
    headers: &HeaderMap,
    multipart: &mut Multipart,
) -> Result<Json<ApiResponse<HomepageUploadResponseDto>>> {
    let upload = read_file_field(multipart, UPLOAD_FIELD).await?;
    let response = service
        .upload_homepage(media_type, upload, &base_url(headers))
        .await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Upload a homepage gallery image
#[utoipa::path(
    post,
    path = "/api/homepage/upload-image",
    request_body(content = UploadFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = ApiResponse<HomepageUploadResponseDto>),
        (status = 400, description = "Missing file, wrong type or too large"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "homepage"
)]
pub async fn upload_homepage_image(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<MediaService>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<HomepageUploadResponseDto>>> {
    upload_homepage(&service, HomepageMediaType::Images, &headers, &mut multipart).await
}

/// Upload a homepage gallery video
#[utoipa::path(
    post,
    path = "/api/homepage/upload-video",
    request_body(content = UploadFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Video stored", body = ApiResponse<HomepageUploadResponseDto>),
        (status = 400, description = "Missing file, wrong type or too large"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "homepage"
)]
pub async fn upload_homepage_video(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<MediaService>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<HomepageUploadResponseDto>>> {
    upload_homepage(&service, HomepageMediaType::Videos, &headers, &mut multipart).await
}

/// Delete a homepage gallery file
#[utoipa::path(
    delete,
    path = "/api/homepage/{media_type}/{filename}",
    params(
        ("media_type" = String, Path, description = "`images` or `videos`"),
        ("filename" = String, Path, description = "Stored file name")
    ),
    responses(
        (status = 200, description = "File deleted", body = ApiResponse<MessageDto>),
        (status = 400, description = "Invalid media type or filename"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "File not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "homepage"
)]
pub async fn delete_homepage_media(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<MediaService>>,
    Path((media_type, filename)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageDto>>> {
    let media_type: HomepageMediaType = media_type.parse()?;
    service.delete_homepage(media_type, &filename).await?;
    Ok(Json(ApiResponse::<MessageDto>::message(
        "File deleted successfully",
    )))
}

/// Replace a homepage gallery file in place
#[utoipa::path(
    put,
    path = "/api/homepage/{media_type}/{filename}",
    params(
        ("media_type" = String, Path, description = "`images` or `videos`"),
        ("filename" = String, Path, description = "Stored file name to overwrite")
    ),
    request_body(content = UploadFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File replaced", body = ApiResponse<ReplaceMediaResponseDto>),
        (status = 400, description = "Invalid media type, filename or upload"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Original file not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "homepage"
)]
pub async fn replace_homepage_media(
    _admin: AuthenticatedAdmin,
    State(service): State<Arc<MediaService>>,
    Path((media_type, filename)): Path<(String, String)>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ReplaceMediaResponseDto>>> {
    let media_type: HomepageMediaType = media_type.parse()?;
    let upload = read_file_field(&mut multipart, UPLOAD_FIELD).await?;
    let response = service
        .replace_homepage(media_type, &filename, upload, &base_url(&headers))
        .await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_base_url_from_host() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:8080"));
        assert_eq!(base_url(&headers), "http://localhost:8080");
    }

    #[test]
    fn test_base_url_prefers_forwarded_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("backend:8080"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        headers.insert("x-forwarded-host", HeaderValue::from_static("mmadesign.vn"));
        assert_eq!(base_url(&headers), "https://mmadesign.vn");
    }
}
