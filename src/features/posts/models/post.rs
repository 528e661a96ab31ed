use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Post row joined with the summary of its category
#[derive(Debug, Clone, FromRow)]
pub struct PostWithCategory {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub image_url: String,
    pub category_id: i32,
    pub published: bool,
    pub views: i32,
    pub meta_title: String,
    pub meta_description: String,
    pub focus_keywords: String,
    pub og_image_url: String,
    pub slug: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub category_description: Option<String>,
}
