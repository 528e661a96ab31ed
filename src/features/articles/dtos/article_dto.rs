use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::articles::models::Article;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::validation::validate_optional_slug;

/// Query parameters for listing articles
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ArticleQueryParams {
    /// Only articles of this category
    pub category: Option<i32>,
    /// Filter on the published flag
    pub published: Option<bool>,
    /// Case-insensitive match against the tag list
    pub tag: Option<String>,
    /// Page size, 1..=100 (default 20)
    pub limit: Option<i64>,
    /// Rows to skip (default 0)
    pub offset: Option<i64>,
}

impl ArticleQueryParams {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    /// Tag filter with surrounding whitespace removed; blank means no filter
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Request DTO for creating or replacing an article
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpsertArticleDto {
    #[validate(length(min = 1, max = 500, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub featured_image_url: String,

    pub category_id: i32,

    #[serde(default)]
    pub published: bool,

    /// Comma-separated tag list
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub tags: String,

    #[serde(default)]
    pub meta_title: String,

    #[serde(default)]
    pub meta_description: String,

    /// Derived from the title when empty
    #[serde(default)]
    #[validate(custom(function = "validate_optional_slug"))]
    pub slug: String,
}

/// Response DTO for article
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleResponseDto {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub featured_image_url: String,
    pub category_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
    pub published: bool,
    pub tags: String,
    pub meta_title: String,
    pub meta_description: String,
    pub slug: String,
    pub author_id: Option<i32>,
    pub view_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Article> for ArticleResponseDto {
    fn from(a: Article) -> Self {
        Self {
            id: a.id,
            title: a.title,
            content: a.content,
            summary: a.summary,
            featured_image_url: a.featured_image_url,
            category_id: a.category_id,
            category_name: a.category_name,
            category_slug: a.category_slug,
            published: a.published,
            tags: a.tags,
            meta_title: a.meta_title,
            meta_description: a.meta_description,
            slug: a.slug,
            author_id: a.author_id,
            view_count: a.view_count,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// How an article is addressed in `GET /api/articles/{identifier}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleIdentifier {
    Id(i32),
    Slug(String),
}

impl ArticleIdentifier {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i32>() {
            Ok(id) => ArticleIdentifier::Id(id),
            Err(_) => ArticleIdentifier::Slug(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults_and_clamping() {
        let params = ArticleQueryParams::default();
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 0);

        let params = ArticleQueryParams {
            limit: Some(500),
            offset: Some(-3),
            ..Default::default()
        };
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 0);

        let params = ArticleQueryParams {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_blank_tag_is_no_filter() {
        let params = ArticleQueryParams {
            tag: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(params.tag(), None);

        let params = ArticleQueryParams {
            tag: Some(" biet-thu ".to_string()),
            ..Default::default()
        };
        assert_eq!(params.tag(), Some("biet-thu"));
    }

    #[test]
    fn test_identifier_parsing() {
        assert_eq!(ArticleIdentifier::parse("42"), ArticleIdentifier::Id(42));
        assert_eq!(
            ArticleIdentifier::parse("nha-pho-2024"),
            ArticleIdentifier::Slug("nha-pho-2024".to_string())
        );
        // Overflowing numbers are treated as slugs
        assert_eq!(
            ArticleIdentifier::parse("99999999999"),
            ArticleIdentifier::Slug("99999999999".to_string())
        );
    }

    #[test]
    fn test_upsert_requires_title_and_content() {
        let dto: UpsertArticleDto =
            serde_json::from_str(r#"{"title":"x","content":"","category_id":1}"#).unwrap();
        assert!(dto.validate().is_err());
        assert!(!dto.published);
    }
}
