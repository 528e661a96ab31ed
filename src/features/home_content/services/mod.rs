mod home_content_service;

pub use home_content_service::HomeContentService;
