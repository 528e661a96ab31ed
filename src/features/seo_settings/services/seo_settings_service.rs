use sqlx::{PgExecutor, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::seo_settings::dtos::{SeoSettingsResponseDto, UpdateSeoSettingsDto};
use crate::features::seo_settings::models::SeoSettings;

const SEO_SETTINGS_SELECT: &str = r#"
    SELECT id, site_name, default_meta_title, default_meta_description,
           COALESCE(default_og_image_url, '') AS default_og_image_url,
           COALESCE(google_analytics_id, '') AS google_analytics_id,
           COALESCE(google_search_console_id, '') AS google_search_console_id,
           COALESCE(facebook_app_id, '') AS facebook_app_id,
           COALESCE(twitter_handle, '') AS twitter_handle,
           company_name,
           COALESCE(company_description, '') AS company_description,
           COALESCE(company_address, '') AS company_address,
           COALESCE(company_phone, '') AS company_phone,
           COALESCE(company_email, '') AS company_email,
           COALESCE(company_logo_url, '') AS company_logo_url,
           COALESCE(business_hours, '') AS business_hours,
           created_at, updated_at
    FROM global_seo_settings
    ORDER BY id
    LIMIT 1
"#;

pub struct SeoSettingsService {
    pool: PgPool,
}

impl SeoSettingsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Stored settings, or the built-in defaults when nothing has been saved
    pub async fn get(&self) -> Result<SeoSettingsResponseDto> {
        let settings = self.fetch().await?;
        Ok(settings
            .map(SeoSettingsResponseDto::from)
            .unwrap_or_else(|| UpdateSeoSettingsDto::builtin().into()))
    }

    /// Update the singleton row, inserting it when absent
    pub async fn upsert(&self, dto: UpdateSeoSettingsDto) -> Result<SeoSettingsResponseDto> {
        let mut tx = self.pool.begin().await?;

        // Self-conflicting mode: concurrent saves queue here, readers do not
        sqlx::query("LOCK TABLE global_seo_settings IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to lock SEO settings: {:?}", e);
                AppError::Database(e)
            })?;

        let existing: Option<i32> =
            sqlx::query_scalar("SELECT id FROM global_seo_settings ORDER BY id LIMIT 1")
                .fetch_optional(&mut *tx)
                .await?;

        match existing {
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE global_seo_settings
                    SET site_name = $1, default_meta_title = $2, default_meta_description = $3,
                        default_og_image_url = $4, google_analytics_id = $5,
                        google_search_console_id = $6, facebook_app_id = $7, twitter_handle = $8,
                        company_name = $9, company_description = $10, company_address = $11,
                        company_phone = $12, company_email = $13, company_logo_url = $14,
                        business_hours = $15, updated_at = CURRENT_TIMESTAMP
                    WHERE id = $16
                    "#,
                )
                .bind(&dto.site_name)
                .bind(&dto.default_meta_title)
                .bind(&dto.default_meta_description)
                .bind(&dto.default_og_image_url)
                .bind(&dto.google_analytics_id)
                .bind(&dto.google_search_console_id)
                .bind(&dto.facebook_app_id)
                .bind(&dto.twitter_handle)
                .bind(&dto.company_name)
                .bind(&dto.company_description)
                .bind(&dto.company_address)
                .bind(&dto.company_phone)
                .bind(&dto.company_email)
                .bind(&dto.company_logo_url)
                .bind(&dto.business_hours)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to update SEO settings: {:?}", e);
                    AppError::Database(e)
                })?;
            }
            None => {
                insert_settings(&mut *tx, &dto).await?;
            }
        }

        tx.commit().await?;
        tracing::info!(created = existing.is_none(), "Global SEO settings saved");

        self.get().await
    }

    async fn fetch(&self) -> Result<Option<SeoSettings>> {
        sqlx::query_as::<_, SeoSettings>(SEO_SETTINGS_SELECT)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get SEO settings: {:?}", e);
                AppError::Database(e)
            })
    }
}

/// Insert a settings row; shared with the startup seed
pub async fn insert_settings<'e, E>(executor: E, dto: &UpdateSeoSettingsDto) -> Result<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO global_seo_settings (
            site_name, default_meta_title, default_meta_description, default_og_image_url,
            google_analytics_id, google_search_console_id, facebook_app_id, twitter_handle,
            company_name, company_description, company_address, company_phone,
            company_email, company_logo_url, business_hours
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        "#,
    )
    .bind(&dto.site_name)
    .bind(&dto.default_meta_title)
    .bind(&dto.default_meta_description)
    .bind(&dto.default_og_image_url)
    .bind(&dto.google_analytics_id)
    .bind(&dto.google_search_console_id)
    .bind(&dto.facebook_app_id)
    .bind(&dto.twitter_handle)
    .bind(&dto.company_name)
    .bind(&dto.company_description)
    .bind(&dto.company_address)
    .bind(&dto.company_phone)
    .bind(&dto.company_email)
    .bind(&dto.company_logo_url)
    .bind(&dto.business_hours)
    .execute(executor)
    .await
    .map_err(|e| {
        tracing::error!("Failed to insert SEO settings: {:?}", e);
        AppError::Database(e)
    })?;

    Ok(())
}
