use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::seo_settings::models::SeoSettings;

const DEFAULT_SITE_NAME: &str = "MMA Architectural Design";

/// Request DTO for the global SEO settings upsert
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateSeoSettingsDto {
    #[validate(length(min = 1, max = 255, message = "Site name is required"))]
    pub site_name: String,
    #[validate(length(min = 1, max = 255, message = "Default meta title is required"))]
    pub default_meta_title: String,
    #[validate(length(min = 1, message = "Default meta description is required"))]
    pub default_meta_description: String,
    pub default_og_image_url: String,
    pub google_analytics_id: String,
    pub google_search_console_id: String,
    pub facebook_app_id: String,
    pub twitter_handle: String,
    #[validate(length(min = 1, max = 255, message = "Company name is required"))]
    pub company_name: String,
    pub company_description: String,
    pub company_address: String,
    pub company_phone: String,
    pub company_email: String,
    pub company_logo_url: String,
    pub business_hours: String,
}

impl UpdateSeoSettingsDto {
    /// Built-in settings served before an admin saves any, and used to seed the table
    pub fn builtin() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            default_meta_title: "MMA Architectural Design - Thiết Kế & Thi Công Biệt Thự"
                .to_string(),
            default_meta_description: "Chuyên thiết kế và thi công biệt thự, nhà ở hiện đại với phong cách kiến trúc độc đáo. Uy tín tại 37 tỉnh thành, hơn 500 dự án hoàn thành.".to_string(),
            company_name: DEFAULT_SITE_NAME.to_string(),
            company_description: "Công ty chuyên thiết kế và thi công biệt thự, nhà ở cao cấp"
                .to_string(),
            company_address: "123 Đường ABC, Quận XYZ, TP.HCM".to_string(),
            company_phone: "0123 456 789".to_string(),
            company_email: "contact@mma-design.com".to_string(),
            business_hours: "Mo-Fr 08:00-17:00, Sa 08:00-12:00".to_string(),
            ..Default::default()
        }
    }
}

/// Response DTO for global SEO settings
///
/// `id` is 0 and the timestamps are absent when the built-in defaults are served.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SeoSettingsResponseDto {
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl From<SeoSettings> for SeoSettingsResponseDto {
    fn from(s: SeoSettings) -> Self {
        Self {
            id: s.id,
            site_name: s.site_name,
            default_meta_title: s.default_meta_title,
            default_meta_description: s.default_meta_description,
            default_og_image_url: s.default_og_image_url,
            google_analytics_id: s.google_analytics_id,
            google_search_console_id: s.google_search_console_id,
            facebook_app_id: s.facebook_app_id,
            twitter_handle: s.twitter_handle,
            company_name: s.company_name,
            company_description: s.company_description,
            company_address: s.company_address,
            company_phone: s.company_phone,
            company_email: s.company_email,
            company_logo_url: s.company_logo_url,
            business_hours: s.business_hours,
            created_at: Some(s.created_at),
            updated_at: Some(s.updated_at),
        }
    }
}

impl From<UpdateSeoSettingsDto> for SeoSettingsResponseDto {
    fn from(s: UpdateSeoSettingsDto) -> Self {
        Self {
            id: 0,
            site_name: s.site_name,
            default_meta_title: s.default_meta_title,
            default_meta_description: s.default_meta_description,
            default_og_image_url: s.default_og_image_url,
            google_analytics_id: s.google_analytics_id,
            google_search_console_id: s.google_search_console_id,
            facebook_app_id: s.facebook_app_id,
            twitter_handle: s.twitter_handle,
            company_name: s.company_name,
            company_description: s.company_description,
            company_address: s.company_address,
            company_phone: s.company_phone,
            company_email: s.company_email,
            company_logo_url: s.company_logo_url,
            business_hours: s.business_hours,
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_settings_are_valid() {
        let builtin = UpdateSeoSettingsDto::builtin();
        assert!(builtin.validate().is_ok());
        assert_eq!(builtin.site_name, "MMA Architectural Design");
        assert_eq!(builtin.google_analytics_id, "");
    }

    #[test]
    fn test_required_fields() {
        let dto: UpdateSeoSettingsDto =
            serde_json::from_str(r#"{"site_name":"MMA","default_meta_title":"t"}"#).unwrap();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("default_meta_description"));
        assert!(fields.contains_key("company_name"));
        assert!(!fields.contains_key("site_name"));
    }

    #[test]
    fn test_defaults_response_omits_timestamps() {
        let json = serde_json::to_value(SeoSettingsResponseDto::from(
            UpdateSeoSettingsDto::builtin(),
        ))
        .unwrap();
        assert_eq!(json["id"], 0);
        assert!(json.get("created_at").is_none());
        assert_eq!(json["business_hours"], "Mo-Fr 08:00-17:00, Sa 08:00-12:00");
    }
}
