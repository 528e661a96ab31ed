use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::error::{AppError, Result};
use crate::features::media::dtos::{
    HomepageMediaDto, HomepageUploadResponseDto, ReplaceMediaResponseDto, SvgUploadResponseDto,
    UploadResponseDto,
};
use crate::features::media::models::{
    validate_file_name, HomepageMediaType, MediaKind, UploadedFile,
};
use crate::modules::storage::{LocalStorage, MediaDir};

/// Service for media uploads and the homepage galleries
pub struct MediaService {
    storage: Arc<LocalStorage>,
}

impl MediaService {
    pub fn new(storage: Arc<LocalStorage>) -> Self {
        Self { storage }
    }

    async fn store(&self, kind: MediaKind, dir: MediaDir, upload: &UploadedFile) -> Result<String> {
        kind.validate(upload)?;

        let filename = upload.stored_name();
        self.storage.save(dir, &filename, &upload.data).await?;

        debug!(
            original = %upload.file_name,
            stored = %filename,
            "Upload saved to {}",
            dir.url_prefix()
        );
        Ok(filename)
    }

    /// Editor upload (images or videos) under `/data/uploads`
    pub async fn upload(
        &self,
        kind: MediaKind,
        upload: UploadedFile,
        base_url: &str,
    ) -> Result<UploadResponseDto> {
        let dir = match kind {
            MediaKind::Video => MediaDir::UploadVideos,
            MediaKind::Svg => MediaDir::SvgIcons,
            MediaKind::Image => MediaDir::UploadImages,
        };
        let filename = self.store(kind, dir, &upload).await?;

        Ok(UploadResponseDto {
            url: dir.public_url(base_url, &filename),
        })
    }

    pub async fn upload_svg(
        &self,
        upload: UploadedFile,
        base_url: &str,
    ) -> Result<SvgUploadResponseDto> {
        let dir = MediaDir::SvgIcons;
        let filename = self.store(MediaKind::Svg, dir, &upload).await?;

        let svg = match self.storage.read_to_string(dir, &filename).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read back SVG {}: {}", filename, e);
                String::new()
            }
        };

        Ok(SvgUploadResponseDto {
            url: dir.public_url(base_url, &filename),
            svg,
            name: upload.stem().to_string(),
        })
    }

    pub async fn list_homepage(&self, base_url: &str) -> Result<HomepageMediaDto> {
        let mut media = HomepageMediaDto::default();

        for (media_type, urls) in [
            (HomepageMediaType::Images, &mut media.images),
            (HomepageMediaType::Videos, &mut media.videos),
        ] {
            let dir = media_type.dir();
            *urls = self
                .storage
                .list(dir)
                .await?
                .into_iter()
                .filter(|name| media_type.lists(name))
                .map(|name| dir.public_url(base_url, &name))
                .collect();
        }

        Ok(media)
    }

    pub async fn upload_homepage(
        &self,
        media_type: HomepageMediaType,
        upload: UploadedFile,
        base_url: &str,
    ) -> Result<HomepageUploadResponseDto> {
        let dir = media_type.dir();
        let filename = self.store(media_type.kind(), dir, &upload).await?;

        Ok(HomepageUploadResponseDto {
            url: dir.public_url(base_url, &filename),
            filename,
        })
    }

    pub async fn delete_homepage(&self, media_type: HomepageMediaType, filename: &str) -> Result<()> {
        validate_file_name(filename)?;

        if !self.storage.delete(media_type.dir(), filename).await? {
            return Err(AppError::NotFound("File not found".to_string()));
        }
        Ok(())
    }

    /// Overwrite a gallery file in place; its URL does not change
    pub async fn replace_homepage(
        &self,
        media_type: HomepageMediaType,
        filename: &str,
        upload: UploadedFile,
        base_url: &str,
    ) -> Result<ReplaceMediaResponseDto> {
        validate_file_name(filename)?;
        media_type.kind().validate(&upload)?;

        let dir = media_type.dir();
        if !self.storage.replace(dir, filename, &upload.data).await? {
            return Err(AppError::NotFound("Original file not found".to_string()));
        }

        Ok(ReplaceMediaResponseDto {
            url: dir.public_url(base_url, filename),
            filename: filename.to_string(),
            message: "File replaced successfully".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StorageConfig;

    fn service(root: &std::path::Path) -> MediaService {
        MediaService::new(Arc::new(LocalStorage::new(&StorageConfig {
            data_dir: root.join("data"),
            homepage_dir: root.join("homepage"),
        })))
    }

    fn file(name: &str, content_type: &str, data: &[u8]) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            data: data.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_rejected_upload_touches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let service = service(tmp.path());

        let err = service
            .upload(MediaKind::Image, file("a.pdf", "application/pdf", b"x"), "http://h")
            .await;
        assert!(matches!(err, Err(AppError::BadRequest(_))));
        assert!(!tmp.path().join("data").exists());
    }

    #[tokio::test]
    async fn test_svg_upload_echoes_content() {
        let tmp = tempfile::tempdir().unwrap();
        let service = service(tmp.path());

        let res = service
            .upload_svg(file("home.svg", "image/svg+xml", b"<svg/>"), "http://h")
            .await
            .unwrap();
        assert_eq!(res.svg, "<svg/>");
        assert_eq!(res.name, "home");
        assert!(res.url.starts_with("http://h/data/uploads/svg-icons/"));
        assert!(res.url.ends_with(".svg"));
    }

    #[tokio::test]
    async fn test_homepage_lifecycle() {
        let tmp = tempfile::tempdir().unwrap();
        let service = service(tmp.path());

        let uploaded = service
            .upload_homepage(
                HomepageMediaType::Images,
                file("Hero.PNG", "image/png", b"png"),
                "http://h",
            )
            .await
            .unwrap();
        assert!(uploaded.filename.ends_with(".png"));

        std::fs::write(tmp.path().join("homepage/images/notes.txt"), b"x").unwrap();

        let media = service.list_homepage("http://h").await.unwrap();
        assert_eq!(
            media.images,
            vec![format!("http://h/homepage/images/{}", uploaded.filename)]
        );
        assert!(media.videos.is_empty());

        let replaced = service
            .replace_homepage(
                HomepageMediaType::Images,
                &uploaded.filename,
                file("other.png", "image/png", b"new"),
                "http://h",
            )
            .await
            .unwrap();
        assert_eq!(replaced.url, uploaded.url);
        assert_eq!(
            std::fs::read(tmp.path().join("homepage/images").join(&uploaded.filename)).unwrap(),
            b"new"
        );

        service
            .delete_homepage(HomepageMediaType::Images, &uploaded.filename)
            .await
            .unwrap();
        assert!(matches!(
            service
                .delete_homepage(HomepageMediaType::Images, &uploaded.filename)
                .await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_replace_missing_original_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let service = service(tmp.path());

        let res = service
            .replace_homepage(
                HomepageMediaType::Videos,
                "nope.mp4",
                file("clip.mp4", "video/mp4", b"v"),
                "http://h",
            )
            .await;
        assert!(matches!(res, Err(AppError::NotFound(_))));
    }
}
