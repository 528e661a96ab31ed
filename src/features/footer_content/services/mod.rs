mod footer_content_service;

pub use footer_content_service::FooterContentService;
