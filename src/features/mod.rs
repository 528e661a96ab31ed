pub mod articles;
pub mod auth;
pub mod categories;
pub mod footer_content;
pub mod home_content;
pub mod media;
pub mod posts;
pub mod seo_settings;
