use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedAdmin, Claims};

/// Issues and validates the HS256 bearer tokens handed out at login
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_secs: i64,
    leeway: u64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            expiry_secs: config.jwt_expiry.as_secs() as i64,
            leeway: config.jwt_leeway.as_secs(),
        }
    }

    /// Lifetime of issued tokens in seconds
    pub fn expires_in(&self) -> i64 {
        self.expiry_secs
    }

    pub fn issue_token(&self, admin: &AuthenticatedAdmin) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: admin.id.to_string(),
            username: admin.username.clone(),
            iat: now,
            exp: now + self.expiry_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            AppError::Internal("Failed to generate token".to_string())
        })
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedAdmin> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Rejected bearer token: {}", e);
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

        let claims = token_data.claims;
        let id = claims
            .sub
            .parse::<i32>()
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;

        Ok(AuthenticatedAdmin {
            id,
            username: claims.username,
        })
    }
}
