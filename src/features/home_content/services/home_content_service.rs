use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::home_content::dtos::{HomeContentResponseDto, UpdateHomeContentDto};
use crate::features::home_content::models::HomeContent;

const HOME_CONTENT_SELECT: &str = r#"
    SELECT id, hero_title,
           COALESCE(hero_description, '') AS hero_description,
           COALESCE(hero_stat1_number, '') AS hero_stat1_number,
           COALESCE(hero_stat1_label, '') AS hero_stat1_label,
           COALESCE(hero_stat2_number, '') AS hero_stat2_number,
           COALESCE(hero_stat2_label, '') AS hero_stat2_label,
           COALESCE(features_title, '') AS features_title,
           COALESCE(features_description, '') AS features_description,
           COALESCE(features_logo_url, '') AS features_logo_url,
           COALESCE(feature1_icon, '') AS feature1_icon,
           COALESCE(feature1_title, '') AS feature1_title,
           COALESCE(feature1_description, '') AS feature1_description,
           COALESCE(feature2_icon, '') AS feature2_icon,
           COALESCE(feature2_title, '') AS feature2_title,
           COALESCE(feature2_description, '') AS feature2_description,
           COALESCE(feature3_icon, '') AS feature3_icon,
           COALESCE(feature3_title, '') AS feature3_title,
           COALESCE(feature3_description, '') AS feature3_description,
           COALESCE(feature4_icon, '') AS feature4_icon,
           COALESCE(feature4_title, '') AS feature4_title,
           COALESCE(feature4_description, '') AS feature4_description,
           COALESCE(meta_title, '') AS meta_title,
           COALESCE(meta_description, '') AS meta_description,
           COALESCE(meta_keywords, '') AS meta_keywords,
           COALESCE(og_title, '') AS og_title,
           COALESCE(og_description, '') AS og_description,
           COALESCE(og_image_url, '') AS og_image_url,
           COALESCE(twitter_title, '') AS twitter_title,
           COALESCE(twitter_description, '') AS twitter_description,
           COALESCE(twitter_image_url, '') AS twitter_image_url,
           created_at, updated_at
    FROM home_content
    ORDER BY id
    LIMIT 1
"#;

/// Service for the homepage content singleton (always the lowest id row)
pub struct HomeContentService {
    pool: PgPool,
}

impl HomeContentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self) -> Result<HomeContentResponseDto> {
        let content = sqlx::query_as::<_, HomeContent>(HOME_CONTENT_SELECT)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get home content: {:?}", e);
                AppError::Database(e)
            })?;

        content
            .map(HomeContentResponseDto::from)
            .ok_or_else(|| AppError::NotFound("Home content not found".to_string()))
    }

    pub async fn update(&self, dto: UpdateHomeContentDto) -> Result<HomeContentResponseDto> {
        let result = sqlx::query(
            r#"
            UPDATE home_content
            SET hero_title = $1, hero_description = $2,
                hero_stat1_number = $3, hero_stat1_label = $4,
                hero_stat2_number = $5, hero_stat2_label = $6,
                features_title = $7, features_description = $8, features_logo_url = $9,
                feature1_icon = $10, feature1_title = $11, feature1_description = $12,
                feature2_icon = $13, feature2_title = $14, feature2_description = $15,
                feature3_icon = $16, feature3_title = $17, feature3_description = $18,
                feature4_icon = $19, feature4_title = $20, feature4_description = $21,
                meta_title = $22, meta_description = $23, meta_keywords = $24,
                og_title = $25, og_description = $26, og_image_url = $27,
                twitter_title = $28, twitter_description = $29, twitter_image_url = $30,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = (SELECT id FROM home_content ORDER BY id LIMIT 1)
            "#,
        )
        .bind(&dto.hero_title)
        .bind(&dto.hero_description)
        .bind(&dto.hero_stat1_number)
        .bind(&dto.hero_stat1_label)
        .bind(&dto.hero_stat2_number)
        .bind(&dto.hero_stat2_label)
        .bind(&dto.features_title)
        .bind(&dto.features_description)
        .bind(&dto.features_logo_url)
        .bind(&dto.feature1_icon)
        .bind(&dto.feature1_title)
        .bind(&dto.feature1_description)
        .bind(&dto.feature2_icon)
        .bind(&dto.feature2_title)
        .bind(&dto.feature2_description)
        .bind(&dto.feature3_icon)
        .bind(&dto.feature3_title)
        .bind(&dto.feature3_description)
        .bind(&dto.feature4_icon)
        .bind(&dto.feature4_title)
        .bind(&dto.feature4_description)
        .bind(&dto.meta_title)
        .bind(&dto.meta_description)
        .bind(&dto.meta_keywords)
        .bind(&dto.og_title)
        .bind(&dto.og_description)
        .bind(&dto.og_image_url)
        .bind(&dto.twitter_title)
        .bind(&dto.twitter_description)
        .bind(&dto.twitter_image_url)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update home content: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Home content not found".to_string()));
        }

        tracing::info!("Home content updated");
        self.get().await
    }
}
