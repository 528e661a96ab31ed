use std::str::FromStr;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::modules::storage::MediaDir;

const MB: usize = 1024 * 1024;

const IMAGE_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

const VIDEO_MIME_TYPES: &[&str] = &[
    "video/mp4",
    "video/avi",
    "video/mov",
    "video/wmv",
    "video/webm",
];

const SVG_MIME_TYPE: &str = "image/svg+xml";

/// Kind of media an upload endpoint accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Svg,
}

impl MediaKind {
    pub fn max_size(&self) -> usize {
        match self {
            MediaKind::Image => 5 * MB,
            MediaKind::Video => 50 * MB,
            MediaKind::Svg => MB,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "images",
            MediaKind::Video => "videos",
            MediaKind::Svg => "SVG files",
        }
    }

    fn accepts(&self, content_type: &str, file_name: &str) -> bool {
        match self {
            MediaKind::Image => IMAGE_MIME_TYPES.contains(&content_type),
            MediaKind::Video => VIDEO_MIME_TYPES.contains(&content_type),
            MediaKind::Svg => content_type == SVG_MIME_TYPE || file_name.ends_with(".svg"),
        }
    }

    /// Check type and size of an upload before anything touches the disk
    pub fn validate(&self, upload: &UploadedFile) -> Result<()> {
        if !self.accepts(&upload.content_type, &upload.file_name) {
            return Err(AppError::BadRequest(format!(
                "Invalid file type. Only {} are allowed.",
                self.label()
            )));
        }

        if upload.data.len() > self.max_size() {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {}MB.",
                self.max_size() / MB
            )));
        }

        Ok(())
    }
}

/// A file part read from a multipart request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Name to store the upload under: a fresh UUID plus the lower-cased original extension
    pub fn stored_name(&self) -> String {
        match extension(&self.file_name) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext.to_lowercase()),
            None => Uuid::new_v4().to_string(),
        }
    }

    /// Original file name without its extension
    pub fn stem(&self) -> &str {
        match self.file_name.rfind('.') {
            Some(idx) if idx > 0 => &self.file_name[..idx],
            _ => &self.file_name,
        }
    }
}

fn extension(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext)
}

/// The two homepage media galleries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomepageMediaType {
    Images,
    Videos,
}

impl HomepageMediaType {
    pub fn kind(&self) -> MediaKind {
        match self {
            HomepageMediaType::Images => MediaKind::Image,
            HomepageMediaType::Videos => MediaKind::Video,
        }
    }

    pub fn dir(&self) -> MediaDir {
        match self {
            HomepageMediaType::Images => MediaDir::HomepageImages,
            HomepageMediaType::Videos => MediaDir::HomepageVideos,
        }
    }

    fn extensions(&self) -> &'static [&'static str] {
        match self {
            HomepageMediaType::Images => &["jpg", "jpeg", "png", "gif", "webp"],
            HomepageMediaType::Videos => &["mp4", "avi", "mov", "wmv", "webm"],
        }
    }

    /// Whether a stored file belongs in this gallery listing
    pub fn lists(&self, file_name: &str) -> bool {
        extension(file_name)
            .map(|ext| self.extensions().contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }
}

impl FromStr for HomepageMediaType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "images" => Ok(HomepageMediaType::Images),
            "videos" => Ok(HomepageMediaType::Videos),
            _ => Err(AppError::BadRequest(
                "Invalid media type. Must be 'images' or 'videos'".to_string(),
            )),
        }
    }
}

/// Reject names that could escape the media directory
pub fn validate_file_name(file_name: &str) -> Result<()> {
    if file_name.is_empty()
        || file_name.contains('/')
        || file_name.contains('\\')
        || file_name.contains("..")
    {
        return Err(AppError::BadRequest("Invalid filename".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content_type: &str, size: usize) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            data: vec![0; size],
        }
    }

    #[test]
    fn test_image_policy() {
        assert!(MediaKind::Image.validate(&upload("a.png", "image/png", 10)).is_ok());
        assert!(MediaKind::Image.validate(&upload("a.jpg", "image/jpg", 10)).is_ok());
        assert!(MediaKind::Image
            .validate(&upload("a.png", "application/pdf", 10))
            .is_err());
        assert!(MediaKind::Image
            .validate(&upload("a.png", "image/png", 5 * MB))
            .is_ok());
        assert!(MediaKind::Image
            .validate(&upload("a.png", "image/png", 5 * MB + 1))
            .is_err());
    }

    #[test]
    fn test_video_policy() {
        assert!(MediaKind::Video.validate(&upload("a.mp4", "video/mp4", 10)).is_ok());
        assert!(MediaKind::Video.validate(&upload("a.mp4", "image/png", 10)).is_err());
        assert!(MediaKind::Video
            .validate(&upload("a.webm", "video/webm", 50 * MB + 1))
            .is_err());
    }

    #[test]
    fn test_svg_policy_accepts_mime_or_extension() {
        assert!(MediaKind::Svg
            .validate(&upload("icon", SVG_MIME_TYPE, 10))
            .is_ok());
        assert!(MediaKind::Svg
            .validate(&upload("icon.svg", "application/octet-stream", 10))
            .is_ok());
        assert!(MediaKind::Svg.validate(&upload("icon.png", "image/png", 10)).is_err());
        assert!(MediaKind::Svg
            .validate(&upload("icon.svg", SVG_MIME_TYPE, MB + 1))
            .is_err());
    }

    #[test]
    fn test_stored_name_keeps_lowercased_extension() {
        let name = upload("Photo.JPG", "image/jpeg", 1).stored_name();
        let (id, ext) = name.rsplit_once('.').unwrap();
        assert_eq!(ext, "jpg");
        assert!(Uuid::parse_str(id).is_ok());

        let bare = upload("README", "image/png", 1).stored_name();
        assert!(Uuid::parse_str(&bare).is_ok());
    }

    #[test]
    fn test_stem() {
        assert_eq!(upload("home-icon.svg", SVG_MIME_TYPE, 1).stem(), "home-icon");
        assert_eq!(upload("archive.tar.svg", SVG_MIME_TYPE, 1).stem(), "archive.tar");
        assert_eq!(upload(".svg", SVG_MIME_TYPE, 1).stem(), ".svg");
    }

    #[test]
    fn test_homepage_type_parsing_and_listing() {
        assert_eq!(
            "images".parse::<HomepageMediaType>().unwrap(),
            HomepageMediaType::Images
        );
        assert!("docs".parse::<HomepageMediaType>().is_err());

        assert!(HomepageMediaType::Images.lists("hero.WEBP"));
        assert!(!HomepageMediaType::Images.lists("clip.mp4"));
        assert!(HomepageMediaType::Videos.lists("clip.mov"));
        assert!(!HomepageMediaType::Videos.lists("notes.txt"));
        assert!(!HomepageMediaType::Videos.lists("mp4"));
    }

    #[test]
    fn test_file_name_traversal_rejected() {
        assert!(validate_file_name("abc.png").is_ok());
        assert!(validate_file_name("../secret").is_err());
        assert!(validate_file_name("a/b.png").is_err());
        assert!(validate_file_name("a\\b.png").is_err());
        assert!(validate_file_name("").is_err());
    }
}
