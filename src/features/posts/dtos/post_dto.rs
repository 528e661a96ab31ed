use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::posts::models::PostWithCategory;
use crate::shared::validation::validate_optional_slug;

/// Query parameters for listing posts
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PostQueryParams {
    /// Only posts of this category
    pub category: Option<i32>,
}

/// Request DTO for creating or replacing a post
///
/// Updates overwrite every field with the submitted value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpsertPostDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub image_url: String,

    pub category_id: i32,

    #[serde(default = "default_published")]
    pub published: bool,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub views: i32,

    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub focus_keywords: String,
    #[serde(default)]
    pub og_image_url: String,

    #[serde(default)]
    #[validate(custom(function = "validate_optional_slug"))]
    pub slug: String,
}

fn default_published() -> bool {
    true
}

/// Category summary embedded in post responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostCategoryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
}

/// Response DTO for post
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostResponseDto {
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<PostCategoryDto>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<PostWithCategory> for PostResponseDto {
    fn from(p: PostWithCategory) -> Self {
        let category = match (p.category_name, p.category_slug) {
            (Some(name), Some(slug)) => Some(PostCategoryDto {
                id: p.category_id,
                name,
                slug,
                description: p.category_description.unwrap_or_default(),
            }),
            _ => None,
        };

        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            summary: p.summary,
            image_url: p.image_url,
            category_id: p.category_id,
            published: p.published,
            views: p.views,
            meta_title: p.meta_title,
            meta_description: p.meta_description,
            focus_keywords: p.focus_keywords,
            og_image_url: p.og_image_url,
            slug: p.slug,
            category,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
