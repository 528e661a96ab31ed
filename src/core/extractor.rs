use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedAdmin;

/// JSON body that has passed its `validator` rules.
///
/// Malformed bodies and rule violations both come back as 400 in the usual
/// error envelope.
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        value
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(Self(value))
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    let message = match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid JSON: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON: {}", err.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Invalid JSON: expected Content-Type: application/json".to_string()
        }
        JsonRejection::BytesRejection(_) => "Invalid JSON: request body unreadable".to_string(),
        _ => "Invalid JSON".to_string(),
    };
    AppError::BadRequest(message)
}

impl<S> FromRequestParts<S> for AuthenticatedAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAdmin>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Router};
    use axum_test::TestServer;
    use serde::Deserialize;
    use serde_json::{json, Value};

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
    }

    async fn echo(ValidJson(payload): ValidJson<Payload>) -> String {
        payload.name
    }

    async fn whoami(admin: AuthenticatedAdmin) -> String {
        admin.username
    }

    fn server() -> TestServer {
        let app = Router::new()
            .route("/echo", post(echo))
            .route("/whoami", post(whoami));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes_through() {
        let response = server().post("/echo").json(&json!({"name": "Biệt Thự"})).await;
        response.assert_status_ok();
        response.assert_text("Biệt Thự");
    }

    #[tokio::test]
    async fn test_syntax_error_reported_as_invalid_json() {
        let response = server()
            .post("/echo")
            .content_type("application/json")
            .bytes("{\"name\":".into())
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn test_missing_field_reported_as_invalid_json() {
        let response = server().post("/echo").json(&json!({"title": "x"})).await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn test_rule_violation_is_validation_error() {
        let response = server().post("/echo").json(&json!({"name": ""})).await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert!(body["message"].as_str().unwrap().contains("Name is required"));
    }

    #[tokio::test]
    async fn test_admin_extractor_requires_middleware() {
        server().post("/whoami").await.assert_status_unauthorized();
    }
}
