use crate::core::error::AppError;
use crate::features::auth::TokenService;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok());

            if let Some(encoded) = auth_header.and_then(|h| h.strip_prefix("Basic ")) {
                if let Ok(decoded) = BASE64_STANDARD.decode(encoded) {
                    if let Ok(creds) = String::from_utf8(decoded) {
                        if creds == *credentials {
                            return Ok(next.run(req).await);
                        }
                    }
                }
            }

            let mut response = (StatusCode::UNAUTHORIZED, Body::from("Unauthorized")).into_response();
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"Swagger UI\""),
            );

            Err(response)
        })
    }
}

/// Validates the bearer token on protected routes and exposes the admin to handlers
pub async fn auth_middleware(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::Unauthorized("Invalid authorization header format".to_string())
        })?;

    let admin = tokens.validate_token(token)?;

    req.extensions_mut().insert(admin);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::{routes as categories_routes, CategoryService};
    use crate::features::seo_settings::{routes as seo_routes, SeoSettingsService};
    use crate::shared::test_helpers::{admin_token, lazy_pool, test_auth_config};
    use axum::Router;
    use axum_test::TestServer;
    use serde_json::json;

    fn protected_server() -> (TestServer, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new(&test_auth_config()));
        let pool = lazy_pool();
        let app = Router::new()
            .merge(categories_routes::protected_routes(Arc::new(
                CategoryService::new(pool.clone()),
            )))
            .merge(seo_routes::protected_routes(Arc::new(SeoSettingsService::new(
                pool,
            ))))
            .route_layer(axum::middleware::from_fn_with_state(
                Arc::clone(&tokens),
                auth_middleware,
            ));
        (TestServer::new(app).unwrap(), tokens)
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let (server, _) = protected_server();

        let res = server
            .post("/api/categories")
            .json(&json!({"name": "Mẫu Thiết Kế"}))
            .await;
        res.assert_status_unauthorized();
        let body: serde_json::Value = res.json();
        assert_eq!(body["success"], false);

        server
            .put("/api/seo-settings")
            .json(&json!({}))
            .await
            .assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_malformed_or_forged_token_is_unauthorized() {
        let (server, _) = protected_server();

        server
            .delete("/api/categories/1")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static("Token abc"))
            .await
            .assert_status_unauthorized();

        server
            .delete("/api/categories/1")
            .authorization_bearer("not-a-jwt")
            .await
            .assert_status_unauthorized();

        let other = TokenService::new(&crate::core::config::AuthConfig {
            jwt_secret: "a-different-secret-entirely".to_string(),
            ..test_auth_config()
        });
        server
            .delete("/api/categories/1")
            .authorization_bearer(admin_token(&other))
            .await
            .assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let (server, tokens) = protected_server();

        // Validation runs before any database access
        let res = server
            .post("/api/categories")
            .authorization_bearer(admin_token(&tokens))
            .json(&json!({"name": ""}))
            .await;
        res.assert_status_bad_request();
    }
}
