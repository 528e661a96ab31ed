use chrono::NaiveDateTime;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct SeoSettings {
    pub id: i32,
    pub site_name: String,
    pub default_meta_title: String,
    pub default_meta_description: String,
    pub default_og_image_url: String,
    pub google_analytics_id: String,
    pub google_search_console_id: String,
    pub facebook_app_id: String,
    pub twitter_handle: String,
    pub company_name: String,
    pub company_description: String,
    pub company_address: String,
    pub company_phone: String,
    pub company_email: String,
    pub company_logo_url: String,
    pub business_hours: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
