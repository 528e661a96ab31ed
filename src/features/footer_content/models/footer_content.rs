use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Database model for the footer singleton.
///
/// `services` and `social_media` are JSON arrays stored as TEXT.
#[derive(Debug, Clone, FromRow)]
pub struct FooterContent {
    pub id: i32,
    pub company_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub facebook_url: String,
    pub instagram_url: String,
    pub youtube_url: String,
    pub linkedin_url: String,
    pub copyright_text: String,
    pub description: String,
    pub services: String,
    pub social_media: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
