use sqlx::PgPool;

use crate::core::database::is_foreign_key_violation;
use crate::core::error::{AppError, Result};
use crate::features::posts::dtos::{PostQueryParams, PostResponseDto, UpsertPostDto};
use crate::features::posts::models::PostWithCategory;

const POST_SELECT: &str = r#"
    SELECT p.id, p.title, COALESCE(p.content, '') AS content,
           COALESCE(p.summary, '') AS summary, COALESCE(p.image_url, '') AS image_url,
           p.category_id, COALESCE(p.published, TRUE) AS published, COALESCE(p.views, 0) AS views,
           COALESCE(p.meta_title, '') AS meta_title,
           COALESCE(p.meta_description, '') AS meta_description,
           COALESCE(p.focus_keywords, '') AS focus_keywords,
           COALESCE(p.og_image_url, '') AS og_image_url,
           COALESCE(p.slug, '') AS slug,
           p.created_at, p.updated_at,
           c.name AS category_name, c.slug AS category_slug,
           COALESCE(c.description, '') AS category_description
    FROM posts p
    LEFT JOIN categories c ON p.category_id = c.id
"#;

/// Service for post operations
pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List posts, newest first
    pub async fn list(&self, params: &PostQueryParams) -> Result<Vec<PostResponseDto>> {
        let posts = sqlx::query_as::<_, PostWithCategory>(&format!(
            "{} WHERE ($1::INT IS NULL OR p.category_id = $1) ORDER BY p.created_at DESC",
            POST_SELECT
        ))
        .bind(params.category)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list posts: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(posts.into_iter().map(PostResponseDto::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<PostResponseDto> {
        self.fetch(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, dto: UpsertPostDto) -> Result<PostResponseDto> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO posts (title, content, summary, image_url, category_id, published, views,
                meta_title, meta_description, focus_keywords, og_image_url, slug)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(&dto.summary)
        .bind(&dto.image_url)
        .bind(dto.category_id)
        .bind(dto.published)
        .bind(dto.views)
        .bind(&dto.meta_title)
        .bind(&dto.meta_description)
        .bind(&dto.focus_keywords)
        .bind(&dto.og_image_url)
        .bind(&dto.slug)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_write_error)?;

        tracing::info!("Post created: id={}, category={}", id, dto.category_id);
        self.get_by_id(id).await
    }

    /// Replace every field of a post
    pub async fn update(&self, id: i32, dto: UpsertPostDto) -> Result<PostResponseDto> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, content = $3, summary = $4, image_url = $5, category_id = $6,
                published = $7, views = $8, meta_title = $9, meta_description = $10,
                focus_keywords = $11, og_image_url = $12, slug = $13,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(&dto.summary)
        .bind(&dto.image_url)
        .bind(dto.category_id)
        .bind(dto.published)
        .bind(dto.views)
        .bind(&dto.meta_title)
        .bind(&dto.meta_description)
        .bind(&dto.focus_keywords)
        .bind(&dto.og_image_url)
        .bind(&dto.slug)
        .execute(&self.pool)
        .await
        .map_err(handle_write_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete post {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Post deleted: id={}", id);
        Ok(())
    }

    async fn fetch(&self, id: i32) -> Result<Option<PostResponseDto>> {
        let post = sqlx::query_as::<_, PostWithCategory>(&format!("{} WHERE p.id = $1", POST_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get post {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(post.map(PostResponseDto::from))
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Post {} not found", id))
}

fn handle_write_error(e: sqlx::Error) -> AppError {
    if is_foreign_key_violation(&e) {
        return AppError::BadRequest("Invalid category".to_string());
    }
    tracing::error!("Failed to write post: {:?}", e);
    AppError::Database(e)
}
