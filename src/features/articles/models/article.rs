use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Article row joined with its category's name and slug
#[derive(Debug, Clone, FromRow)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub featured_image_url: String,
    pub category_id: i32,
    pub published: bool,
    /// Comma-separated
    pub tags: String,
    pub meta_title: String,
    pub meta_description: String,
    pub slug: String,
    pub author_id: Option<i32>,
    pub view_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
}
