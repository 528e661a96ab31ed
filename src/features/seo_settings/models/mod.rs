mod seo_settings;

pub use seo_settings::SeoSettings;
