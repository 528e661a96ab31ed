use sqlx::PgPool;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AdminDto, LoginRequestDto, LoginResponseDto};
use crate::features::auth::model::{Admin, AuthenticatedAdmin};
use crate::features::auth::services::token_service::TokenService;

/// Service for admin login
pub struct AuthService {
    pool: PgPool,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, token_service: Arc<TokenService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }

    /// Verify credentials against the stored admin row and issue a bearer token
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, username, password FROM admin WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load admin: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(invalid_credentials)?;

        if !verify_password(&dto.password, &admin.password)? {
            tracing::info!("Rejected login for admin '{}'", admin.username);
            return Err(invalid_credentials());
        }

        let identity = AuthenticatedAdmin {
            id: admin.id,
            username: admin.username,
        };
        let token = self.token_service.issue_token(&identity)?;

        tracing::info!("Admin logged in: id={}", identity.id);

        Ok(LoginResponseDto {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_service.expires_in(),
            admin: AdminDto {
                id: identity.id,
                username: identity.username,
            },
        })
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".to_string())
}

/// bcrypt comparison; a malformed stored hash counts as a server fault
fn verify_password(password: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(password, hash).map_err(|e| {
        tracing::error!("Stored admin password hash is unusable: {}", e);
        AppError::Internal("Failed to verify credentials".to_string())
    })
}
