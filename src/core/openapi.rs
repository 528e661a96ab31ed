use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::articles::{dtos as articles_dtos, handlers as articles_handlers};
use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers, AuthenticatedAdmin};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::footer_content::{dtos as footer_dtos, handlers as footer_handlers};
use crate::features::home_content::{dtos as home_dtos, handlers as home_handlers};
use crate::features::media::{dtos as media_dtos, handlers as media_handlers};
use crate::features::posts::{dtos as posts_dtos, handlers as posts_handlers};
use crate::features::seo_settings::{dtos as seo_dtos, handlers as seo_handlers};
use crate::shared::types::{ApiResponse, Meta, MessageDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::logout,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        categories_handlers::update_category_order,
        // Posts
        posts_handlers::list_posts,
        posts_handlers::get_post,
        posts_handlers::create_post,
        posts_handlers::update_post,
        posts_handlers::delete_post,
        // Articles
        articles_handlers::list_articles,
        articles_handlers::get_article,
        articles_handlers::create_article,
        articles_handlers::update_article,
        articles_handlers::delete_article,
        // Site content
        home_handlers::get_home_content,
        home_handlers::update_home_content,
        footer_handlers::get_footer_content,
        footer_handlers::update_footer_content,
        seo_handlers::get_seo_settings,
        seo_handlers::update_seo_settings,
        // Media
        media_handlers::upload_image,
        media_handlers::upload_video,
        media_handlers::upload_svg_icon,
        media_handlers::list_homepage_media,
        media_handlers::upload_homepage_image,
        media_handlers::upload_homepage_video,
        media_handlers::delete_homepage_media,
        media_handlers::replace_homepage_media,
    ),
    components(
        schemas(
            // Shared
            Meta,
            MessageDto,
            ApiResponse<MessageDto>,
            // Auth
            AuthenticatedAdmin,
            auth_dtos::LoginRequestDto,
            auth_dtos::LoginResponseDto,
            auth_dtos::AdminDto,
            ApiResponse<auth_dtos::LoginResponseDto>,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryOrderItemDto,
            categories_dtos::UpdateCategoryOrderDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryNodeDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryNodeDto>>,
            // Posts
            posts_dtos::UpsertPostDto,
            posts_dtos::PostCategoryDto,
            posts_dtos::PostResponseDto,
            ApiResponse<posts_dtos::PostResponseDto>,
            ApiResponse<Vec<posts_dtos::PostResponseDto>>,
            // Articles
            articles_dtos::UpsertArticleDto,
            articles_dtos::ArticleResponseDto,
            ApiResponse<articles_dtos::ArticleResponseDto>,
            ApiResponse<Vec<articles_dtos::ArticleResponseDto>>,
            // Site content
            home_dtos::UpdateHomeContentDto,
            home_dtos::HomeContentResponseDto,
            ApiResponse<home_dtos::HomeContentResponseDto>,
            footer_dtos::SocialMediaItemDto,
            footer_dtos::UpdateFooterContentDto,
            footer_dtos::FooterContentResponseDto,
            ApiResponse<footer_dtos::FooterContentResponseDto>,
            seo_dtos::UpdateSeoSettingsDto,
            seo_dtos::SeoSettingsResponseDto,
            ApiResponse<seo_dtos::SeoSettingsResponseDto>,
            // Media
            media_dtos::UploadFormDto,
            media_dtos::SvgUploadFormDto,
            media_dtos::UploadResponseDto,
            media_dtos::SvgUploadResponseDto,
            media_dtos::HomepageUploadResponseDto,
            media_dtos::ReplaceMediaResponseDto,
            media_dtos::HomepageMediaDto,
            ApiResponse<media_dtos::UploadResponseDto>,
            ApiResponse<media_dtos::SvgUploadResponseDto>,
            ApiResponse<media_dtos::HomepageUploadResponseDto>,
            ApiResponse<media_dtos::ReplaceMediaResponseDto>,
            ApiResponse<media_dtos::HomepageMediaDto>,
        )
    ),
    tags(
        (name = "auth", description = "Admin login"),
        (name = "categories", description = "Hierarchical content categories"),
        (name = "posts", description = "Legacy posts"),
        (name = "articles", description = "Rich text articles with view counting"),
        (name = "home-content", description = "Homepage hero and feature blocks"),
        (name = "footer-content", description = "Site footer"),
        (name = "seo-settings", description = "Global SEO settings"),
        (name = "media", description = "Editor uploads"),
        (name = "homepage", description = "Homepage gallery media"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "House Design API",
        version = "0.1.0",
        description = "API documentation for the House Design CMS",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_paths_document_bearer_auth() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
        assert!(doc["paths"]["/api/categories"]["post"]["security"].is_array());
        assert!(doc["paths"]["/api/categories"]["get"]["security"].is_null());
        assert!(doc["paths"]["/api/homepage/{media_type}/{filename}"]["delete"].is_object());
    }
}
