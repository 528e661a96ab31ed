mod home_content_dto;

pub use home_content_dto::{HomeContentResponseDto, UpdateHomeContentDto};
