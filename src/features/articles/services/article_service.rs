use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::database::{is_foreign_key_violation, is_unique_violation};
use crate::core::error::{AppError, Result};
use crate::features::articles::dtos::{
    ArticleIdentifier, ArticleQueryParams, ArticleResponseDto, UpsertArticleDto,
};
use crate::features::articles::models::Article;
use crate::shared::slug::slugify;

const ARTICLE_COLUMNS: &str = r#"
    a.id, a.title, a.content, COALESCE(a.summary, '') AS summary,
    COALESCE(a.featured_image_url, '') AS featured_image_url,
    a.category_id, COALESCE(a.published, FALSE) AS published,
    COALESCE(a.tags, '') AS tags,
    COALESCE(a.meta_title, '') AS meta_title,
    COALESCE(a.meta_description, '') AS meta_description,
    a.slug, a.author_id, COALESCE(a.view_count, 0) AS view_count,
    a.created_at, a.updated_at,
    c.name AS category_name, c.slug AS category_slug
"#;

/// Service for article operations
pub struct ArticleService {
    pool: PgPool,
}

impl ArticleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Filtered page of articles, newest first, plus the filtered total
    pub async fn list(&self, params: &ArticleQueryParams) -> Result<(Vec<ArticleResponseDto>, i64)> {
        let mut count_query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM articles a");
        push_filters(&mut count_query, params);

        let total: i64 = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count articles: {:?}", e);
                AppError::Database(e)
            })?;

        let mut list_query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM articles a LEFT JOIN categories c ON a.category_id = c.id",
            ARTICLE_COLUMNS
        ));
        push_filters(&mut list_query, params);
        list_query
            .push(" ORDER BY a.created_at DESC LIMIT ")
            .push_bind(params.limit())
            .push(" OFFSET ")
            .push_bind(params.offset());

        let articles = list_query
            .build_query_as::<Article>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list articles: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((
            articles.into_iter().map(ArticleResponseDto::from).collect(),
            total,
        ))
    }

    /// Numeric identifiers read by id; anything else reads by slug and counts
    /// as one view.
    pub async fn get(&self, identifier: ArticleIdentifier) -> Result<ArticleResponseDto> {
        match identifier {
            ArticleIdentifier::Id(id) => self.get_by_id(id).await,
            ArticleIdentifier::Slug(slug) => self.view_by_slug(&slug).await,
        }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<ArticleResponseDto> {
        let article = sqlx::query_as::<_, Article>(&format!(
            "SELECT {} FROM articles a LEFT JOIN categories c ON a.category_id = c.id WHERE a.id = $1",
            ARTICLE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get article {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        article
            .map(ArticleResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Article {} not found", id)))
    }

    async fn view_by_slug(&self, slug: &str) -> Result<ArticleResponseDto> {
        // Increment and read in one statement so concurrent views are not lost
        let article = sqlx::query_as::<_, Article>(&format!(
            r#"
            WITH a AS (
                UPDATE articles
                SET view_count = COALESCE(view_count, 0) + 1
                WHERE slug = $1
                RETURNING *
            )
            SELECT {} FROM a LEFT JOIN categories c ON a.category_id = c.id
            "#,
            ARTICLE_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get article by slug '{}': {:?}", slug, e);
            AppError::Database(e)
        })?;

        article
            .map(ArticleResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Article '{}' not found", slug)))
    }

    pub async fn create(&self, author_id: i32, dto: UpsertArticleDto) -> Result<ArticleResponseDto> {
        let slug = resolve_slug(&dto)?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO articles (title, content, summary, featured_image_url, category_id,
                published, tags, meta_title, meta_description, slug, author_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(&dto.summary)
        .bind(&dto.featured_image_url)
        .bind(dto.category_id)
        .bind(dto.published)
        .bind(&dto.tags)
        .bind(&dto.meta_title)
        .bind(&dto.meta_description)
        .bind(&slug)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| handle_write_error(e, &slug))?;

        tracing::info!("Article created: id={}, slug={}", id, slug);
        self.get_by_id(id).await
    }

    /// Replace every field of an article
    pub async fn update(&self, id: i32, dto: UpsertArticleDto) -> Result<ArticleResponseDto> {
        let slug = resolve_slug(&dto)?;

        let result = sqlx::query(
            r#"
            UPDATE articles
            SET title = $2, content = $3, summary = $4, featured_image_url = $5,
                category_id = $6, published = $7, tags = $8, meta_title = $9,
                meta_description = $10, slug = $11, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(&dto.summary)
        .bind(&dto.featured_image_url)
        .bind(dto.category_id)
        .bind(dto.published)
        .bind(&dto.tags)
        .bind(&dto.meta_title)
        .bind(&dto.meta_description)
        .bind(&slug)
        .execute(&self.pool)
        .await
        .map_err(|e| handle_write_error(e, &slug))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Article {} not found", id)));
        }

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete article {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Article {} not found", id)));
        }

        tracing::info!("Article deleted: id={}", id);
        Ok(())
    }
}

/// Append the WHERE clause; placeholders are numbered as binds are pushed
fn push_filters(query: &mut QueryBuilder<'_, Postgres>, params: &ArticleQueryParams) {
    query.push(" WHERE TRUE");

    if let Some(category) = params.category {
        query.push(" AND a.category_id = ").push_bind(category);
    }
    if let Some(published) = params.published {
        query.push(" AND a.published = ").push_bind(published);
    }
    if let Some(tag) = params.tag() {
        query.push(" AND a.tags ILIKE ").push_bind(like_pattern(tag));
    }
}

/// `%tag%` with LIKE wildcards in the tag itself escaped
fn like_pattern(tag: &str) -> String {
    let mut pattern = String::with_capacity(tag.len() + 2);
    pattern.push('%');
    for c in tag.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn resolve_slug(dto: &UpsertArticleDto) -> Result<String> {
    let slug = if dto.slug.is_empty() {
        slugify(&dto.title)
    } else {
        dto.slug.clone()
    };

    if slug.is_empty() {
        return Err(AppError::Validation(
            "Title must contain at least one letter or digit".to_string(),
        ));
    }
    Ok(slug)
}

fn handle_write_error(e: sqlx::Error, slug: &str) -> AppError {
    if is_unique_violation(&e) {
        return AppError::Conflict(format!("Article slug '{}' already exists", slug));
    }
    if is_foreign_key_violation(&e) {
        return AppError::BadRequest("Invalid category".to_string());
    }
    tracing::error!("Failed to write article: {:?}", e);
    AppError::Database(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::TestDatabase;

    async fn seeded_ids(db: &TestDatabase) -> (i32, i32) {
        let admin: i32 = sqlx::query_scalar("SELECT id FROM admin ORDER BY id LIMIT 1")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        let category: i32 = sqlx::query_scalar("SELECT id FROM categories WHERE slug = 'tin-tuc'")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        (admin, category)
    }

    fn article(title: &str, category_id: i32) -> UpsertArticleDto {
        UpsertArticleDto {
            title: title.to_string(),
            content: "<p>Nội dung</p>".to_string(),
            category_id,
            ..Default::default()
        }
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("biet-thu"), "%biet-thu%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }

    #[test]
    fn test_filters_number_placeholders_in_order() {
        let params = ArticleQueryParams {
            category: Some(3),
            published: Some(true),
            tag: Some("nha".to_string()),
            ..Default::default()
        };
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM articles a");
        push_filters(&mut query, &params);

        assert_eq!(
            query.sql(),
            "SELECT COUNT(*) FROM articles a WHERE TRUE AND a.category_id = $1 \
             AND a.published = $2 AND a.tags ILIKE $3"
        );
    }

    #[test]
    fn test_filters_skip_absent_params() {
        let params = ArticleQueryParams {
            tag: Some(" ".to_string()),
            published: Some(false),
            ..Default::default()
        };
        let mut query = QueryBuilder::<Postgres>::new("SELECT 1 FROM articles a");
        push_filters(&mut query, &params);

        assert_eq!(
            query.sql(),
            "SELECT 1 FROM articles a WHERE TRUE AND a.published = $1"
        );
    }

    #[test]
    fn test_slug_derived_from_title() {
        let dto = UpsertArticleDto {
            title: "Nhà Phố Đẹp 2024".to_string(),
            content: "x".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_slug(&dto).unwrap(), "nha-pho-dep-2024");

        let dto = UpsertArticleDto {
            title: "!!!".to_string(),
            ..Default::default()
        };
        assert!(matches!(resolve_slug(&dto), Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_only_slug_reads_count_views() {
        let Some(db) = TestDatabase::connect("test_only_slug_reads_count_views").await else {
            return;
        };
        let (admin, category) = seeded_ids(&db).await;
        let service = ArticleService::new(db.pool.clone());

        let created = service
            .create(admin, article("Xu Hướng Nhà Phố 2024", category))
            .await
            .unwrap();
        assert_eq!(created.slug, "xu-huong-nha-pho-2024");
        assert_eq!(created.view_count, 0);

        let viewed = service
            .get(ArticleIdentifier::parse("xu-huong-nha-pho-2024"))
            .await
            .unwrap();
        assert_eq!(viewed.view_count, 1);

        let by_id = service
            .get(ArticleIdentifier::parse(&created.id.to_string()))
            .await
            .unwrap();
        assert_eq!(by_id.view_count, 1);

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_duplicate_slug_conflicts() {
        let Some(db) = TestDatabase::connect("test_duplicate_slug_conflicts").await else {
            return;
        };
        let (admin, category) = seeded_ids(&db).await;
        let service = ArticleService::new(db.pool.clone());

        service
            .create(admin, article("Biệt Thự Vườn", category))
            .await
            .unwrap();
        let duplicate = service.create(admin, article("Biệt Thự Vườn", category)).await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));

        let unknown_category = service.create(admin, article("Nhà Cấp 4", i32::MAX)).await;
        assert!(matches!(unknown_category, Err(AppError::BadRequest(_))));

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_list_filters_and_counts() {
        let Some(db) = TestDatabase::connect("test_list_filters_and_counts").await else {
            return;
        };
        let (admin, category) = seeded_ids(&db).await;
        let service = ArticleService::new(db.pool.clone());

        for (title, tags, published) in [
            ("Nhà Phố Hiện Đại", "nha-pho,hien-dai", true),
            ("Biệt Thự Tân Cổ Điển", "biet-thu", true),
            ("Bản Nháp", "nha-pho", false),
        ] {
            service
                .create(
                    admin,
                    UpsertArticleDto {
                        tags: tags.to_string(),
                        published,
                        ..article(title, category)
                    },
                )
                .await
                .unwrap();
        }

        let (articles, total) = service
            .list(&ArticleQueryParams {
                published: Some(true),
                tag: Some("nha-pho".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(articles[0].slug, "nha-pho-hien-dai");

        let (_, total) = service
            .list(&ArticleQueryParams {
                category: Some(category),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(total, 3);

        db.drop_schema().await;
    }
}
