use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Database model for the homepage content singleton
#[derive(Debug, Clone, FromRow)]
pub struct HomeContent {
    pub id: i32,
    pub hero_title: String,
    pub hero_description: String,
    pub hero_stat1_number: String,
    pub hero_stat1_label: String,
    pub hero_stat2_number: String,
    pub hero_stat2_label: String,
    pub features_title: String,
    pub features_description: String,
    pub features_logo_url: String,
    pub feature1_icon: String,
    pub feature1_title: String,
    pub feature1_description: String,
    pub feature2_icon: String,
    pub feature2_title: String,
    pub feature2_description: String,
    pub feature3_icon: String,
    pub feature3_title: String,
    pub feature3_description: String,
    pub feature4_icon: String,
    pub feature4_title: String,
    pub feature4_description: String,
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image_url: String,
    pub twitter_title: String,
    pub twitter_description: String,
    pub twitter_image_url: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
