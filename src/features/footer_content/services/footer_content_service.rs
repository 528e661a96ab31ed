use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::footer_content::dtos::{FooterContentResponseDto, UpdateFooterContentDto};
use crate::features::footer_content::models::FooterContent;

const FOOTER_SELECT: &str = r#"
    SELECT id, company_name,
           COALESCE(address, '') AS address,
           COALESCE(phone, '') AS phone,
           COALESCE(email, '') AS email,
           COALESCE(facebook_url, '') AS facebook_url,
           COALESCE(instagram_url, '') AS instagram_url,
           COALESCE(youtube_url, '') AS youtube_url,
           COALESCE(linkedin_url, '') AS linkedin_url,
           COALESCE(copyright_text, '') AS copyright_text,
           COALESCE(description, '') AS description,
           COALESCE(services, '[]') AS services,
           COALESCE(social_media, '[]') AS social_media,
           created_at, updated_at
    FROM footer_content
    ORDER BY id
    LIMIT 1
"#;

pub struct FooterContentService {
    pool: PgPool,
}

impl FooterContentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self) -> Result<FooterContentResponseDto> {
        let footer = sqlx::query_as::<_, FooterContent>(FOOTER_SELECT)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get footer content: {:?}", e);
                AppError::Database(e)
            })?;

        footer
            .map(FooterContentResponseDto::from)
            .ok_or_else(|| AppError::NotFound("Footer content not found".to_string()))
    }

    pub async fn update(&self, dto: UpdateFooterContentDto) -> Result<FooterContentResponseDto> {
        let services = serde_json::to_string(&dto.services)
            .map_err(|e| AppError::BadRequest(format!("Failed to process services data: {}", e)))?;
        let social_media = serde_json::to_string(&dto.social_media).map_err(|e| {
            AppError::BadRequest(format!("Failed to process social media data: {}", e))
        })?;

        let result = sqlx::query(
            r#"
            UPDATE footer_content
            SET company_name = $1, address = $2, phone = $3, email = $4,
                facebook_url = $5, instagram_url = $6, youtube_url = $7, linkedin_url = $8,
                copyright_text = $9, description = $10, services = $11, social_media = $12,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = (SELECT id FROM footer_content ORDER BY id LIMIT 1)
            "#,
        )
        .bind(&dto.company_name)
        .bind(&dto.address)
        .bind(&dto.phone)
        .bind(&dto.email)
        .bind(&dto.facebook_url)
        .bind(&dto.instagram_url)
        .bind(&dto.youtube_url)
        .bind(&dto.linkedin_url)
        .bind(&dto.copyright_text)
        .bind(&dto.description)
        .bind(&services)
        .bind(&social_media)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update footer content: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Footer content not found".to_string()));
        }

        tracing::info!(
            services = dto.services.len(),
            social_media = dto.social_media.len(),
            "Footer content updated"
        );
        self.get().await
    }
}
