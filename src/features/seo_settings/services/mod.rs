mod seo_settings_service;

pub use seo_settings_service::{insert_settings, SeoSettingsService};
