use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Multipart form for image and video uploads
/// Note: This struct is for Swagger UI documentation only.
/// The handlers read the `upload` part from axum's Multipart extractor.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFormDto {
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub upload: String,
}

/// Multipart form for SVG icon uploads (documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct SvgUploadFormDto {
    #[schema(format = Binary, content_media_type = "image/svg+xml")]
    pub svg: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponseDto {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SvgUploadResponseDto {
    pub url: String,
    /// Raw SVG markup for inline preview
    pub svg: String,
    /// Original file name without extension
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HomepageUploadResponseDto {
    pub url: String,
    pub filename: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReplaceMediaResponseDto {
    pub url: String,
    pub filename: String,
    pub message: String,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct HomepageMediaDto {
    pub images: Vec<String>,
    pub videos: Vec<String>,
}
