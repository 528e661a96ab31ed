mod article_dto;

pub use article_dto::{ArticleIdentifier, ArticleQueryParams, ArticleResponseDto, UpsertArticleDto};
