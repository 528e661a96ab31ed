use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::{Category, CategoryType};
use crate::shared::validation::validate_optional_slug;

/// Request DTO for creating a category
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    /// Derived from `name` when empty
    #[serde(default)]
    #[validate(custom(function = "validate_optional_slug"))]
    pub slug: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub thumbnail_url: String,

    /// parent | product | regular | news (defaults to product)
    #[serde(default)]
    pub category_type: String,

    pub parent_id: Option<i32>,

    /// 0 or absent means "append after the last sibling"
    #[serde(default)]
    pub order_index: i32,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub meta_keywords: String,
    #[serde(default)]
    pub og_image_url: String,
}

fn default_active() -> bool {
    true
}

/// Request DTO for updating a category
///
/// `name`, `slug` and `category_type` are only applied when non-empty and
/// `parent_id` only when present. Every other field always overwrites the
/// stored value, so omitting it clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = "validate_optional_slug"))]
    pub slug: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub thumbnail_url: String,

    #[serde(default)]
    pub category_type: String,

    pub parent_id: Option<i32>,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub meta_keywords: String,
    #[serde(default)]
    pub og_image_url: String,
}

impl UpdateCategoryDto {
    /// Merge the scalar fields into a stored category. Parent and level are
    /// resolved separately since they need the store.
    pub fn apply_to(&self, category: &mut Category) {
        if !self.name.is_empty() {
            category.name = self.name.clone();
        }
        if !self.slug.is_empty() {
            category.slug = self.slug.clone();
        }
        // Unknown types are rejected before the merge; store the canonical name
        if let Ok(category_type) = self.category_type.parse::<CategoryType>() {
            category.category_type = category_type.as_str().to_string();
        }

        category.description = self.description.clone();
        category.thumbnail_url = self.thumbnail_url.clone();
        category.is_active = self.is_active;
        category.meta_title = self.meta_title.clone();
        category.meta_description = self.meta_description.clone();
        category.meta_keywords = self.meta_keywords.clone();
        category.og_image_url = self.og_image_url.clone();
    }
}

/// One entry of a display-order batch
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CategoryOrderItemDto {
    pub id: i32,
    pub display_order: i32,
}

/// Request DTO for reordering categories
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryOrderDto {
    pub categories: Vec<CategoryOrderItemDto>,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub thumbnail_url: String,
    pub category_type: String,
    pub parent_id: Option<i32>,
    pub level: i32,
    pub order_index: i32,
    pub display_order: i32,
    pub is_active: bool,
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub og_image_url: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            thumbnail_url: c.thumbnail_url,
            category_type: c.category_type,
            parent_id: c.parent_id,
            level: c.level,
            order_index: c.order_index,
            display_order: c.display_order,
            is_active: c.is_active,
            meta_title: c.meta_title,
            meta_description: c.meta_description,
            meta_keywords: c.meta_keywords,
            og_image_url: c.og_image_url,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Category with its nested children, as returned by the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryNodeDto {
    #[serde(flatten)]
    pub category: CategoryResponseDto,
    pub children: Vec<CategoryNodeDto>,
}

impl From<Category> for CategoryNodeDto {
    fn from(c: Category) -> Self {
        Self {
            category: c.into(),
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Category {
        let now = chrono::Utc::now().naive_utc();
        Category {
            id: 1,
            name: "Mẫu Thiết Kế".to_string(),
            slug: "mau-thiet-ke".to_string(),
            description: "Old description".to_string(),
            thumbnail_url: "/data/uploads/images/a.png".to_string(),
            category_type: "product".to_string(),
            parent_id: None,
            level: 0,
            order_index: 1,
            display_order: 1,
            is_active: true,
            meta_title: "Title".to_string(),
            meta_description: "Desc".to_string(),
            meta_keywords: "a,b".to_string(),
            og_image_url: "/og.png".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_name_slug_and_type_keep_stored_values() {
        let mut category = stored();
        UpdateCategoryDto::default().apply_to(&mut category);

        assert_eq!(category.name, "Mẫu Thiết Kế");
        assert_eq!(category.slug, "mau-thiet-ke");
        assert_eq!(category.category_type, "product");
    }

    #[test]
    fn test_omitted_fields_clear_stored_values() {
        let mut category = stored();
        UpdateCategoryDto::default().apply_to(&mut category);

        assert_eq!(category.description, "");
        assert_eq!(category.thumbnail_url, "");
        assert_eq!(category.meta_title, "");
        assert_eq!(category.og_image_url, "");
        assert!(!category.is_active);
    }

    #[test]
    fn test_non_empty_fields_overwrite() {
        let mut category = stored();
        let dto = UpdateCategoryDto {
            name: "Tin Tức".to_string(),
            slug: "tin-tuc".to_string(),
            category_type: "news".to_string(),
            is_active: true,
            meta_keywords: "news".to_string(),
            ..Default::default()
        };
        dto.apply_to(&mut category);

        assert_eq!(category.name, "Tin Tức");
        assert_eq!(category.slug, "tin-tuc");
        assert_eq!(category.category_type, "news");
        assert_eq!(category.meta_keywords, "news");
        assert!(category.is_active);
        // parent/level untouched by the scalar merge
        assert_eq!(category.parent_id, None);
        assert_eq!(category.level, 0);
    }

    #[test]
    fn test_category_type_stored_in_canonical_form() {
        let mut category = stored();
        let dto = UpdateCategoryDto {
            category_type: "  news ".to_string(),
            ..Default::default()
        };
        dto.apply_to(&mut category);

        assert_eq!(category.category_type, "news");
    }

    #[test]
    fn test_create_dto_defaults() {
        let dto: CreateCategoryDto = serde_json::from_str(r#"{"name":"Biệt Thự"}"#).unwrap();
        assert!(dto.is_active);
        assert_eq!(dto.slug, "");
        assert_eq!(dto.order_index, 0);
        assert_eq!(dto.parent_id, None);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_malformed_slug() {
        let dto = CreateCategoryDto {
            name: "Biệt Thự".to_string(),
            slug: "Biet Thu".to_string(),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_node_serializes_flat_with_children() {
        let node = CategoryNodeDto::from(stored());
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["slug"], "mau-thiet-ke");
        assert!(value["children"].as_array().unwrap().is_empty());
    }
}
