use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::features::media::handlers;
use crate::features::media::models::MediaKind;
use crate::features::media::services::MediaService;

/// Room for multipart framing on top of the file itself
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

fn body_limit(kind: MediaKind) -> DefaultBodyLimit {
    DefaultBodyLimit::max(kind.max_size() + MULTIPART_OVERHEAD)
}

pub fn public_routes(service: Arc<MediaService>) -> Router {
    Router::new()
        .route("/api/homepage/media", get(handlers::list_homepage_media))
        .with_state(service)
}

pub fn protected_routes(service: Arc<MediaService>) -> Router {
    Router::new()
        .route(
            "/api/upload",
            post(handlers::upload_image).layer(body_limit(MediaKind::Image)),
        )
        .route(
            "/api/upload-video",
            post(handlers::upload_video).layer(body_limit(MediaKind::Video)),
        )
        .route(
            "/api/upload-svg-icon",
            post(handlers::upload_svg_icon).layer(body_limit(MediaKind::Svg)),
        )
        .route(
            "/api/homepage/upload-image",
            post(handlers::upload_homepage_image).layer(body_limit(MediaKind::Image)),
        )
        .route(
            "/api/homepage/upload-video",
            post(handlers::upload_homepage_video).layer(body_limit(MediaKind::Video)),
        )
        .route(
            "/api/homepage/{media_type}/{filename}",
            put(handlers::replace_homepage_media)
                .delete(handlers::delete_homepage_media)
                .layer(body_limit(MediaKind::Video)),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StorageConfig;
    use crate::modules::storage::LocalStorage;
    use crate::shared::test_helpers::with_admin_auth;
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::Value;

    fn server(root: &std::path::Path) -> TestServer {
        let storage = Arc::new(LocalStorage::new(&StorageConfig {
            data_dir: root.join("data"),
            homepage_dir: root.join("homepage"),
        }));
        let service = Arc::new(MediaService::new(storage));
        let app = public_routes(service.clone()).merge(with_admin_auth(protected_routes(service)));
        TestServer::new(app).unwrap()
    }

    fn form(field: &str, name: &str, mime: &str, data: &[u8]) -> MultipartForm {
        MultipartForm::new().add_part(
            field,
            Part::bytes(data.to_vec()).file_name(name).mime_type(mime),
        )
    }

    #[tokio::test]
    async fn test_upload_image_returns_public_url() {
        let tmp = tempfile::tempdir().unwrap();
        let server = server(tmp.path());

        let res = server
            .post("/api/upload")
            .add_header(
                HeaderName::from_static("x-forwarded-host"),
                HeaderValue::from_static("cdn.example.com"),
            )
            .multipart(form("upload", "photo.PNG", "image/png", b"png"))
            .await;

        res.assert_status_ok();
        let body: Value = res.json();
        let url = body["data"]["url"].as_str().unwrap();
        assert!(url.starts_with("http://cdn.example.com/data/uploads/images/"));
        assert!(url.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_upload_rejects_wrong_type_and_missing_field() {
        let tmp = tempfile::tempdir().unwrap();
        let server = server(tmp.path());

        server
            .post("/api/upload")
            .multipart(form("upload", "doc.pdf", "application/pdf", b"%PDF"))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .post("/api/upload-video")
            .multipart(form("file", "clip.mp4", "video/mp4", b"v"))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        assert!(!tmp.path().join("data").exists());
    }

    #[tokio::test]
    async fn test_homepage_media_flow() {
        let tmp = tempfile::tempdir().unwrap();
        let server = server(tmp.path());

        let res = server
            .post("/api/homepage/upload-video")
            .multipart(form("upload", "clip.mp4", "video/mp4", b"video"))
            .await;
        res.assert_status_ok();
        let body: Value = res.json();
        let filename = body["data"]["filename"].as_str().unwrap().to_string();

        let listed: Value = server.get("/api/homepage/media").await.json();
        assert_eq!(listed["data"]["images"], serde_json::json!([]));
        assert_eq!(listed["data"]["videos"].as_array().unwrap().len(), 1);

        server
            .put(&format!("/api/homepage/videos/{}", filename))
            .multipart(form("upload", "new.mp4", "video/mp4", b"newer"))
            .await
            .assert_status_ok();

        server
            .delete(&format!("/api/homepage/docs/{}", filename))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .delete(&format!("/api/homepage/videos/{}", filename))
            .await
            .assert_status_ok();

        server
            .delete(&format!("/api/homepage/videos/{}", filename))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_replace_missing_original() {
        let tmp = tempfile::tempdir().unwrap();
        let server = server(tmp.path());

        server
            .put("/api/homepage/images/missing.png")
            .multipart(form("upload", "a.png", "image/png", b"x"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
