mod media_service;

pub use media_service::MediaService;
