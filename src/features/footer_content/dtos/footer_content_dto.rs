use chrono::NaiveDateTime;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::footer_content::models::FooterContent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct SocialMediaItemDto {
    #[validate(length(min = 1, max = 100, message = "Social media name is required"))]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub icon: String,
}

/// Request DTO for replacing the footer
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateFooterContentDto {
    #[validate(length(min = 1, max = 255, message = "Company name is required"))]
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
    pub services: Vec<String>,
    #[validate(nested)]
    pub social_media: Vec<SocialMediaItemDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FooterContentResponseDto {
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
    pub services: Vec<String>,
    pub social_media: Vec<SocialMediaItemDto>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Decode a stored JSON array, degrading to empty when the column is blank or malformed
pub fn decode_json_list<T: DeserializeOwned>(raw: &str, column: &str) -> Vec<T> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(column, raw, "Malformed JSON list in footer_content: {}", e);
        Vec::new()
    })
}

impl From<FooterContent> for FooterContentResponseDto {
    fn from(f: FooterContent) -> Self {
        Self {
            services: decode_json_list(&f.services, "services"),
            social_media: decode_json_list(&f.social_media, "social_media"),
            id: f.id,
            company_name: f.company_name,
            address: f.address,
            phone: f.phone,
            email: f.email,
            facebook_url: f.facebook_url,
            instagram_url: f.instagram_url,
            youtube_url: f.youtube_url,
            linkedin_url: f.linkedin_url,
            copyright_text: f.copyright_text,
            description: f.description,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn footer(services: &str, social_media: &str) -> FooterContent {
        let now = chrono::Utc::now().naive_utc();
        FooterContent {
            id: 1,
            company_name: "MMA Architectural Design".to_string(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            facebook_url: String::new(),
            instagram_url: String::new(),
            youtube_url: String::new(),
            linkedin_url: String::new(),
            copyright_text: String::new(),
            description: String::new(),
            services: services.to_string(),
            social_media: social_media.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_decodes_stored_arrays() {
        let dto = FooterContentResponseDto::from(footer(
            r#"["Thiết kế kiến trúc","Thi công xây dựng"]"#,
            r#"[{"name":"Facebook","url":"https://facebook.com/mmadesign","icon":"facebook"}]"#,
        ));

        assert_eq!(dto.services, vec!["Thiết kế kiến trúc", "Thi công xây dựng"]);
        assert_eq!(dto.social_media.len(), 1);
        assert_eq!(dto.social_media[0].icon, "facebook");
    }

    #[test]
    fn test_malformed_or_blank_columns_become_empty() {
        let dto = FooterContentResponseDto::from(footer("not json", ""));
        assert!(dto.services.is_empty());
        assert!(dto.social_media.is_empty());

        let dto = FooterContentResponseDto::from(footer("[]", r#"{"name":"x"}"#));
        assert!(dto.services.is_empty());
        assert!(dto.social_media.is_empty());
    }

    #[test]
    fn test_update_requires_company_name() {
        let dto: UpdateFooterContentDto = serde_json::from_str(r#"{"services":["a"]}"#).unwrap();
        assert!(dto.validate().is_err());

        let dto: UpdateFooterContentDto = serde_json::from_str(
            r#"{"company_name":"MMA","social_media":[{"name":"YouTube","url":"u","icon":"play_circle"}]}"#,
        )
        .unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.social_media[0].name, "YouTube");
    }
}
