mod post_dto;

pub use post_dto::{PostCategoryDto, PostQueryParams, PostResponseDto, UpsertPostDto};
