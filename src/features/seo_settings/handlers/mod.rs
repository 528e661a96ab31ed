mod seo_settings_handler;

pub use seo_settings_handler::*;
