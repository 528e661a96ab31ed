use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::home_content::models::HomeContent;

/// Request DTO for replacing the homepage content
///
/// Every field overwrites the stored value; omitted fields become empty.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateHomeContentDto {
    #[validate(length(min = 1, max = 500, message = "Hero title is required"))]
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
}

/// Response DTO for homepage content
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomeContentResponseDto {
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

impl From<HomeContent> for HomeContentResponseDto {
    fn from(h: HomeContent) -> Self {
        Self {
            id: h.id,
            hero_title: h.hero_title,
            hero_description: h.hero_description,
            hero_stat1_number: h.hero_stat1_number,
            hero_stat1_label: h.hero_stat1_label,
            hero_stat2_number: h.hero_stat2_number,
            hero_stat2_label: h.hero_stat2_label,
            features_title: h.features_title,
            features_description: h.features_description,
            features_logo_url: h.features_logo_url,
            feature1_icon: h.feature1_icon,
            feature1_title: h.feature1_title,
            feature1_description: h.feature1_description,
            feature2_icon: h.feature2_icon,
            feature2_title: h.feature2_title,
            feature2_description: h.feature2_description,
            feature3_icon: h.feature3_icon,
            feature3_title: h.feature3_title,
            feature3_description: h.feature3_description,
            feature4_icon: h.feature4_icon,
            feature4_title: h.feature4_title,
            feature4_description: h.feature4_description,
            meta_title: h.meta_title,
            meta_description: h.meta_description,
            meta_keywords: h.meta_keywords,
            og_title: h.og_title,
            og_description: h.og_description,
            og_image_url: h.og_image_url,
            twitter_title: h.twitter_title,
            twitter_description: h.twitter_description,
            twitter_image_url: h.twitter_image_url,
            created_at: h.created_at,
            updated_at: h.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_body_defaults_to_empty_fields() {
        let dto: UpdateHomeContentDto =
            serde_json::from_str(r#"{"hero_title":"MMA Architectural Design"}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.feature4_title, "");
        assert_eq!(dto.og_image_url, "");
    }

    #[test]
    fn test_hero_title_required() {
        let dto: UpdateHomeContentDto = serde_json::from_str("{}").unwrap();
        assert!(dto.validate().is_err());
    }
}
