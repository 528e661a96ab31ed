mod seo_settings_dto;

pub use seo_settings_dto::{SeoSettingsResponseDto, UpdateSeoSettingsDto};
