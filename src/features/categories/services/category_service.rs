use sqlx::{PgExecutor, PgPool};

use crate::core::database::{has_error_code, is_unique_violation, UNDEFINED_COLUMN};
use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryNodeDto, CategoryOrderItemDto, CategoryResponseDto, CreateCategoryDto,
    UpdateCategoryDto,
};
use crate::features::categories::models::{Category, CategoryType, LegacyCategory, Placement};
use crate::features::categories::services::tree::{build_forest, flat_nodes};
use crate::shared::slug::{numbered_candidate, slugify, with_parent_prefix};

/// Upper bound on `-N` suffixes tried for one slug
const MAX_SLUG_ATTEMPTS: u32 = 1000;

/// Inserts retried after losing a slug race to a concurrent writer
const MAX_INSERT_ATTEMPTS: u32 = 3;

const CATEGORY_COLUMNS: &str = r#"
    id, name, slug, COALESCE(description, '') AS description,
    COALESCE(thumbnail_url, '') AS thumbnail_url,
    COALESCE(category_type, 'product') AS category_type,
    parent_id, COALESCE(level, 0) AS level,
    COALESCE(order_index, 0) AS order_index,
    COALESCE(display_order, 0) AS display_order,
    COALESCE(is_active, TRUE) AS is_active,
    COALESCE(meta_title, '') AS meta_title,
    COALESCE(meta_description, '') AS meta_description,
    COALESCE(meta_keywords, '') AS meta_keywords,
    COALESCE(og_image_url, '') AS og_image_url,
    created_at, updated_at
"#;

#[derive(Debug, sqlx::FromRow)]
struct ParentRef {
    id: i32,
    level: i32,
    slug: String,
    category_type: String,
}

impl ParentRef {
    /// Parents whose type cannot nest reject new children
    fn accept_children(&self) -> Result<()> {
        let parent_type = self
            .category_type
            .parse::<CategoryType>()
            .unwrap_or_default();
        if parent_type.allows_children() {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!(
                "Categories of type '{}' cannot have subcategories",
                parent_type
            )))
        }
    }
}

/// Service for the category tree
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All categories as a forest. Falls back to a flat list on stores that
    /// have not received the SEO/type columns yet.
    pub async fn list(&self) -> Result<Vec<CategoryNodeDto>> {
        let query = format!(
            "SELECT {} FROM categories \
             ORDER BY category_type ASC, level ASC, display_order ASC, order_index ASC, created_at ASC",
            CATEGORY_COLUMNS
        );

        match sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await
        {
            Ok(rows) => Ok(build_forest(rows)),
            Err(e) if has_error_code(&e, UNDEFINED_COLUMN) => {
                tracing::warn!("Category columns missing, serving legacy flat list: {}", e);
                self.list_legacy().await.map(flat_nodes)
            }
            Err(e) => {
                tracing::error!("Failed to list categories: {:?}", e);
                Err(AppError::Database(e))
            }
        }
    }

    async fn list_legacy(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, LegacyCategory>(
            r#"
            SELECT id, name, slug, COALESCE(description, '') AS description,
                   parent_id, COALESCE(level, 0) AS level,
                   COALESCE(order_index, 0) AS order_index,
                   COALESCE(display_order, 0) AS display_order,
                   created_at, updated_at
            FROM categories
            ORDER BY level ASC, display_order ASC, order_index ASC, created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list legacy categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<CategoryResponseDto> {
        fetch_category(&self.pool, id)
            .await?
            .map(CategoryResponseDto::from)
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let category_type = parse_type_or_default(&dto.category_type)?;

        let base_slug = if dto.slug.is_empty() {
            slugify(&dto.name)
        } else {
            dto.slug.clone()
        };
        if base_slug.is_empty() {
            return Err(AppError::Validation(
                "Name must contain at least one letter or digit".to_string(),
            ));
        }

        // Childless types never look at the requested parent
        let requested_parent = dto.parent_id.filter(|_| category_type.allows_children());

        let (placement, base_slug) = match requested_parent {
            Some(parent_id) => {
                let parent = fetch_parent(&self.pool, parent_id)
                    .await?
                    .ok_or_else(invalid_parent)?;
                parent.accept_children()?;
                (
                    Placement::under(parent.id, parent.level),
                    with_parent_prefix(&base_slug, &parent.slug),
                )
            }
            None => (Placement::ROOT, base_slug),
        };
        let placement = placement.enforce_type(category_type);

        let order_index = if dto.order_index == 0 {
            self.next_order_index(placement.parent_id).await?
        } else {
            dto.order_index
        };

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let slug = unique_slug(&self.pool, &base_slug).await?;

            let inserted = sqlx::query_as::<_, Category>(&format!(
                r#"
                INSERT INTO categories (name, slug, description, thumbnail_url, category_type,
                    parent_id, level, order_index, is_active,
                    meta_title, meta_description, meta_keywords, og_image_url)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                RETURNING {}
                "#,
                CATEGORY_COLUMNS
            ))
            .bind(&dto.name)
            .bind(&slug)
            .bind(&dto.description)
            .bind(&dto.thumbnail_url)
            .bind(category_type.as_str())
            .bind(placement.parent_id)
            .bind(placement.level)
            .bind(order_index)
            .bind(dto.is_active)
            .bind(&dto.meta_title)
            .bind(&dto.meta_description)
            .bind(&dto.meta_keywords)
            .bind(&dto.og_image_url)
            .fetch_one(&self.pool)
            .await;

            match inserted {
                Ok(category) => {
                    tracing::info!(
                        "Category created: id={}, slug={}, level={}",
                        category.id,
                        category.slug,
                        category.level
                    );
                    return Ok(category.into());
                }
                Err(e) if is_unique_violation(&e) => {
                    tracing::warn!(
                        "Slug '{}' taken concurrently (attempt {}/{})",
                        slug,
                        attempt,
                        MAX_INSERT_ATTEMPTS
                    );
                }
                Err(e) => {
                    tracing::error!("Failed to create category: {:?}", e);
                    return Err(AppError::Database(e));
                }
            }
        }

        Err(AppError::Conflict(format!(
            "Could not allocate a unique slug for '{}'",
            base_slug
        )))
    }

    pub async fn update(&self, id: i32, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        if !dto.category_type.trim().is_empty() {
            parse_type(&dto.category_type)?;
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let mut category = fetch_category(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        dto.apply_to(&mut category);

        // Rows written before the type column existed read back as product
        let category_type = category
            .category_type
            .parse::<CategoryType>()
            .unwrap_or_default();

        if !category_type.allows_children() && has_children(&mut *tx, id).await? {
            return Err(AppError::BadRequest(format!(
                "A category with subcategories cannot become type '{}'",
                category_type
            )));
        }

        let mut placement = Placement {
            parent_id: category.parent_id,
            level: category.level,
        };

        // Childless types never look at the requested parent
        if let Some(parent_id) = dto.parent_id.filter(|_| category_type.allows_children()) {
            if parent_id == id {
                return Err(AppError::BadRequest(
                    "A category cannot be its own parent".to_string(),
                ));
            }
            let parent = fetch_parent(&mut *tx, parent_id)
                .await?
                .ok_or_else(invalid_parent)?;
            parent.accept_children()?;
            if is_descendant(&mut *tx, id, parent_id).await? {
                return Err(AppError::BadRequest(
                    "A category cannot be moved under one of its descendants".to_string(),
                ));
            }
            placement = Placement::under(parent.id, parent.level);
        }

        let placement = placement.enforce_type(category_type);
        category.parent_id = placement.parent_id;
        category.level = placement.level;

        let updated = sqlx::query_as::<_, Category>(&format!(
            r#"
            UPDATE categories
            SET name = $2, slug = $3, description = $4, thumbnail_url = $5, category_type = $6,
                parent_id = $7, level = $8, order_index = $9, is_active = $10,
                meta_title = $11, meta_description = $12, meta_keywords = $13, og_image_url = $14,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(&category.thumbnail_url)
        .bind(&category.category_type)
        .bind(category.parent_id)
        .bind(category.level)
        .bind(category.order_index)
        .bind(category.is_active)
        .bind(&category.meta_title)
        .bind(&category.meta_description)
        .bind(&category.meta_keywords)
        .bind(&category.og_image_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return AppError::Conflict(format!(
                    "Category slug '{}' already exists",
                    category.slug
                ));
            }
            tracing::error!("Failed to update category {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        let relevelled = relevel_descendants(&mut *tx, id).await?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit category update: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Category updated: id={}, level={}, descendants re-levelled={}",
            id,
            updated.level,
            relevelled
        );

        Ok(updated.into())
    }

    /// Delete a category; the store cascades to descendants and their content
    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Category deleted: id={}", id);
        Ok(())
    }

    /// Apply a display-order batch atomically
    pub async fn reorder(&self, items: Vec<CategoryOrderItemDto>) -> Result<()> {
        if items.is_empty() {
            return Err(AppError::BadRequest(
                "At least one category is required".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })?;

        for item in &items {
            let result = sqlx::query(
                "UPDATE categories SET display_order = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2",
            )
            .bind(item.display_order)
            .bind(item.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update order of category {}: {:?}", item.id, e);
                AppError::Database(e)
            })?;

            // Dropping the transaction rolls back the earlier updates
            if result.rows_affected() == 0 {
                return Err(not_found(item.id));
            }
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit category order: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Category order updated for {} categories", items.len());
        Ok(())
    }

    async fn next_order_index(&self, parent_id: Option<i32>) -> Result<i32> {
        let max: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(order_index), 0) FROM categories WHERE parent_id IS NOT DISTINCT FROM $1",
        )
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to compute order index: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(max + 1)
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Category {} not found", id))
}

fn invalid_parent() -> AppError {
    AppError::BadRequest("Invalid parent category".to_string())
}

fn parse_type(value: &str) -> Result<CategoryType> {
    value.parse::<CategoryType>().map_err(AppError::Validation)
}

fn parse_type_or_default(value: &str) -> Result<CategoryType> {
    if value.trim().is_empty() {
        Ok(CategoryType::default())
    } else {
        parse_type(value)
    }
}

async fn fetch_category<'e, E: PgExecutor<'e>>(executor: E, id: i32) -> Result<Option<Category>> {
    sqlx::query_as::<_, Category>(&format!(
        "SELECT {} FROM categories WHERE id = $1",
        CATEGORY_COLUMNS
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
    .map_err(|e| {
        tracing::error!("Failed to get category {}: {:?}", id, e);
        AppError::Database(e)
    })
}

async fn fetch_parent<'e, E: PgExecutor<'e>>(executor: E, id: i32) -> Result<Option<ParentRef>> {
    sqlx::query_as::<_, ParentRef>(
        r#"
        SELECT id, COALESCE(level, 0) AS level, slug,
               COALESCE(category_type, 'product') AS category_type
        FROM categories
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
    .map_err(|e| {
        tracing::error!("Failed to get parent category {}: {:?}", id, e);
        AppError::Database(e)
    })
}

/// First free candidate among `base`, `base-1`, `base-2`, ...
async fn unique_slug(pool: &PgPool, base: &str) -> Result<String> {
    for attempt in 0..MAX_SLUG_ATTEMPTS {
        let candidate = numbered_candidate(base, attempt);
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE slug = $1)")
                .bind(&candidate)
                .fetch_one(pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to check slug uniqueness: {:?}", e);
                    AppError::Database(e)
                })?;

        if !taken {
            if attempt > 0 {
                tracing::debug!("Slug '{}' taken, using '{}'", base, candidate);
            }
            return Ok(candidate);
        }
    }

    Err(AppError::Conflict(format!(
        "No free slug found for '{}' after {} attempts",
        base, MAX_SLUG_ATTEMPTS
    )))
}

async fn has_children<'e, E: PgExecutor<'e>>(executor: E, id: i32) -> Result<bool> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE parent_id = $1)")
        .bind(id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check children of category {}: {:?}", id, e);
            AppError::Database(e)
        })
}

/// Whether `candidate` sits somewhere below `ancestor`
async fn is_descendant<'e, E: PgExecutor<'e>>(
    executor: E,
    ancestor: i32,
    candidate: i32,
) -> Result<bool> {
    sqlx::query_scalar(
        r#"
        WITH RECURSIVE descendants AS (
            SELECT id FROM categories WHERE parent_id = $1
            UNION
            SELECT c.id FROM categories c JOIN descendants d ON c.parent_id = d.id
        )
        SELECT EXISTS(SELECT 1 FROM descendants WHERE id = $2)
        "#,
    )
    .bind(ancestor)
    .bind(candidate)
    .fetch_one(executor)
    .await
    .map_err(|e| {
        tracing::error!("Failed to walk category descendants: {:?}", e);
        AppError::Database(e)
    })
}

/// Restore `child.level = parent.level + 1` below `root`. Returns rows changed.
async fn relevel_descendants<'e, E: PgExecutor<'e>>(executor: E, root: i32) -> Result<u64> {
    let result = sqlx::query(
        r#"
        WITH RECURSIVE subtree AS (
            SELECT id, level FROM categories WHERE id = $1
            UNION ALL
            SELECT c.id, s.level + 1
            FROM categories c JOIN subtree s ON c.parent_id = s.id
            WHERE c.id <> $1
        )
        UPDATE categories c
        SET level = subtree.level, updated_at = CURRENT_TIMESTAMP
        FROM subtree
        WHERE c.id = subtree.id AND c.id <> $1 AND c.level <> subtree.level
        "#,
    )
    .bind(root)
    .execute(executor)
    .await
    .map_err(|e| {
        tracing::error!("Failed to re-level descendants of {}: {:?}", root, e);
        AppError::Database(e)
    })?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::TestDatabase;

    fn named(name: &str) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            is_active: true,
            ..Default::default()
        }
    }

    fn child_of(name: &str, parent_id: i32) -> CreateCategoryDto {
        CreateCategoryDto {
            parent_id: Some(parent_id),
            ..named(name)
        }
    }

    fn move_under(parent_id: i32) -> UpdateCategoryDto {
        UpdateCategoryDto {
            parent_id: Some(parent_id),
            is_active: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_derives_level_and_parent_prefixed_slug() {
        let Some(db) = TestDatabase::connect("test_create_derives_level_and_parent_prefixed_slug").await else {
            return;
        };
        let service = CategoryService::new(db.pool.clone());

        let root = service.create(named("Nhà Phố")).await.unwrap();
        assert_eq!(root.slug, "nha-pho");
        assert_eq!(root.level, 0);
        assert_eq!(root.parent_id, None);

        let child = service.create(child_of("Biệt Thự", root.id)).await.unwrap();
        assert_eq!(child.slug, "nha-pho-biet-thu");
        assert_eq!(child.level, 1);
        assert_eq!(child.parent_id, Some(root.id));

        let grandchild = service.create(child_of("Hiện Đại", child.id)).await.unwrap();
        assert_eq!(grandchild.slug, "nha-pho-biet-thu-hien-dai");
        assert_eq!(grandchild.level, 2);

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_duplicate_names_get_numbered_slugs() {
        let Some(db) = TestDatabase::connect("test_duplicate_names_get_numbered_slugs").await else {
            return;
        };
        let service = CategoryService::new(db.pool.clone());

        // The seed already holds mau-thiet-ke
        let first = service.create(named("Mẫu Thiết Kế")).await.unwrap();
        let second = service.create(named("Mẫu Thiết Kế")).await.unwrap();
        assert_eq!(first.slug, "mau-thiet-ke-1");
        assert_eq!(second.slug, "mau-thiet-ke-2");

        let child = service.create(child_of("Biệt Thự", first.id)).await.unwrap();
        assert_eq!(child.slug, "mau-thiet-ke-1-biet-thu");

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_childless_type_ignores_requested_parent() {
        let Some(db) = TestDatabase::connect("test_childless_type_ignores_requested_parent").await else {
            return;
        };
        let service = CategoryService::new(db.pool.clone());

        let root = service.create(named("Nhà Phố")).await.unwrap();
        let news = service
            .create(CreateCategoryDto {
                category_type: "news".to_string(),
                ..child_of("Tin Dự Án", root.id)
            })
            .await
            .unwrap();

        assert_eq!(news.parent_id, None);
        assert_eq!(news.level, 0);
        assert_eq!(news.slug, "tin-du-an");

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_childless_parent_rejects_children() {
        let Some(db) = TestDatabase::connect("test_childless_parent_rejects_children").await else {
            return;
        };
        let service = CategoryService::new(db.pool.clone());

        let news = service
            .create(CreateCategoryDto {
                category_type: "news".to_string(),
                ..named("Tin Dự Án")
            })
            .await
            .unwrap();
        let product = service.create(named("Nhà Phố")).await.unwrap();

        let created = service.create(child_of("Biệt Thự", news.id)).await;
        assert!(matches!(created, Err(AppError::BadRequest(_))));

        let moved = service.update(product.id, move_under(news.id)).await;
        assert!(matches!(moved, Err(AppError::BadRequest(_))));

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_category_with_children_cannot_become_childless() {
        let Some(db) = TestDatabase::connect("test_category_with_children_cannot_become_childless").await else {
            return;
        };
        let service = CategoryService::new(db.pool.clone());

        let root = service.create(named("Nhà Phố")).await.unwrap();
        service.create(child_of("Biệt Thự", root.id)).await.unwrap();

        let result = service
            .update(
                root.id,
                UpdateCategoryDto {
                    category_type: "regular".to_string(),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(service.get_by_id(root.id).await.unwrap().category_type, "product");

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_update_stores_trimmed_category_type() {
        let Some(db) = TestDatabase::connect("test_update_stores_trimmed_category_type").await else {
            return;
        };
        let service = CategoryService::new(db.pool.clone());

        let leaf = service.create(named("Nhà Phố")).await.unwrap();
        let updated = service
            .update(
                leaf.id,
                UpdateCategoryDto {
                    category_type: " news ".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.category_type, "news");

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_update_rejects_cycles() {
        let Some(db) = TestDatabase::connect("test_update_rejects_cycles").await else {
            return;
        };
        let service = CategoryService::new(db.pool.clone());

        let a = service.create(named("Nhà Phố")).await.unwrap();
        let b = service.create(child_of("Biệt Thự", a.id)).await.unwrap();
        let c = service.create(child_of("Hiện Đại", b.id)).await.unwrap();

        let onto_self = service.update(a.id, move_under(a.id)).await;
        assert!(matches!(onto_self, Err(AppError::BadRequest(_))));

        let onto_grandchild = service.update(a.id, move_under(c.id)).await;
        assert!(matches!(onto_grandchild, Err(AppError::BadRequest(_))));

        let unchanged = service.get_by_id(a.id).await.unwrap();
        assert_eq!(unchanged.parent_id, None);
        assert_eq!(unchanged.level, 0);

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_move_relevels_whole_subtree() {
        let Some(db) = TestDatabase::connect("test_move_relevels_whole_subtree").await else {
            return;
        };
        let service = CategoryService::new(db.pool.clone());

        let first_root = service.create(named("Nhà Phố")).await.unwrap();
        let second_root = service.create(named("Biệt Thự")).await.unwrap();
        let anchor = service.create(child_of("Hiện Đại", second_root.id)).await.unwrap();
        let moving = service.create(child_of("Tân Cổ Điển", first_root.id)).await.unwrap();
        let below = service.create(child_of("Mái Thái", moving.id)).await.unwrap();
        assert_eq!(below.level, 2);

        let moved = service.update(moving.id, move_under(anchor.id)).await.unwrap();
        assert_eq!(moved.parent_id, Some(anchor.id));
        assert_eq!(moved.level, 2);
        assert_eq!(service.get_by_id(below.id).await.unwrap().level, 3);

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_reorder_is_all_or_nothing() {
        let Some(db) = TestDatabase::connect("test_reorder_is_all_or_nothing").await else {
            return;
        };
        let service = CategoryService::new(db.pool.clone());

        let category = service.create(named("Nhà Phố")).await.unwrap();
        let before = category.display_order;

        let result = service
            .reorder(vec![
                CategoryOrderItemDto {
                    id: category.id,
                    display_order: before + 50,
                },
                CategoryOrderItemDto {
                    id: i32::MAX,
                    display_order: 1,
                },
            ])
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(service.get_by_id(category.id).await.unwrap().display_order, before);

        service
            .reorder(vec![CategoryOrderItemDto {
                id: category.id,
                display_order: before + 50,
            }])
            .await
            .unwrap();
        assert_eq!(
            service.get_by_id(category.id).await.unwrap().display_order,
            before + 50
        );

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_delete_cascades_to_descendants() {
        let Some(db) = TestDatabase::connect("test_delete_cascades_to_descendants").await else {
            return;
        };
        let service = CategoryService::new(db.pool.clone());

        let root = service.create(named("Nhà Phố")).await.unwrap();
        let child = service.create(child_of("Biệt Thự", root.id)).await.unwrap();
        let grandchild = service.create(child_of("Hiện Đại", child.id)).await.unwrap();

        service.delete(root.id).await.unwrap();

        for id in [root.id, child.id, grandchild.id] {
            assert!(matches!(
                service.get_by_id(id).await,
                Err(AppError::NotFound(_))
            ));
        }
        assert!(matches!(service.delete(root.id).await, Err(AppError::NotFound(_))));

        db.drop_schema().await;
    }

    #[tokio::test]
    async fn test_list_nests_children_under_parents() {
        let Some(db) = TestDatabase::connect("test_list_nests_children_under_parents").await else {
            return;
        };
        let service = CategoryService::new(db.pool.clone());

        let root = service.create(named("Nhà Phố")).await.unwrap();
        let child = service.create(child_of("Biệt Thự", root.id)).await.unwrap();

        let forest = service.list().await.unwrap();
        let node = forest.iter().find(|n| n.category.id == root.id).unwrap();
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].category.id, child.id);
        assert!(forest.iter().all(|n| n.category.id != child.id));

        db.drop_schema().await;
    }
}
