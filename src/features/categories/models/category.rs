use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::shared::constants::{
    CATEGORY_TYPE_NEWS, CATEGORY_TYPE_PARENT, CATEGORY_TYPE_PRODUCT, CATEGORY_TYPE_REGULAR,
};

/// Database model for category
#[derive(Debug, Clone, FromRow)]
pub struct Category {
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

/// Row shape for stores that predate the SEO/type columns
#[derive(Debug, Clone, FromRow)]
pub struct LegacyCategory {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub parent_id: Option<i32>,
    pub level: i32,
    pub order_index: i32,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<LegacyCategory> for Category {
    fn from(c: LegacyCategory) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            thumbnail_url: String::new(),
            category_type: CategoryType::default().to_string(),
            parent_id: c.parent_id,
            level: c.level,
            order_index: c.order_index,
            display_order: c.display_order,
            is_active: true,
            meta_title: String::new(),
            meta_description: String::new(),
            meta_keywords: String::new(),
            og_image_url: String::new(),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Category type; `parent`/`product` may hold children, `regular`/`news` may not.
///
/// The older names (`parent`, `regular`) are kept as written so existing rows
/// round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Parent,
    #[default]
    Product,
    Regular,
    News,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Parent => CATEGORY_TYPE_PARENT,
            CategoryType::Product => CATEGORY_TYPE_PRODUCT,
            CategoryType::Regular => CATEGORY_TYPE_REGULAR,
            CategoryType::News => CATEGORY_TYPE_NEWS,
        }
    }

    pub fn allows_children(&self) -> bool {
        matches!(self, CategoryType::Parent | CategoryType::Product)
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            CATEGORY_TYPE_PARENT => Ok(CategoryType::Parent),
            CATEGORY_TYPE_PRODUCT => Ok(CategoryType::Product),
            CATEGORY_TYPE_REGULAR => Ok(CategoryType::Regular),
            CATEGORY_TYPE_NEWS => Ok(CategoryType::News),
            other => Err(format!("Unknown category type '{}'", other)),
        }
    }
}

/// Where a category sits in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub parent_id: Option<i32>,
    pub level: i32,
}

impl Placement {
    pub const ROOT: Placement = Placement {
        parent_id: None,
        level: 0,
    };

    /// Directly below a parent at `parent_level`
    pub fn under(parent_id: i32, parent_level: i32) -> Self {
        Self {
            parent_id: Some(parent_id),
            level: parent_level + 1,
        }
    }

    /// Type rules applied after everything else: childless types are always
    /// roots, and any parentless category sits at level 0.
    pub fn enforce_type(self, category_type: CategoryType) -> Self {
        if !category_type.allows_children() || self.parent_id.is_none() {
            Placement::ROOT
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_type_parsing() {
        assert_eq!("parent".parse::<CategoryType>(), Ok(CategoryType::Parent));
        assert_eq!("news".parse::<CategoryType>(), Ok(CategoryType::News));
        assert_eq!(" product ".parse::<CategoryType>(), Ok(CategoryType::Product));
        assert!("Product".parse::<CategoryType>().is_err());
        assert!("".parse::<CategoryType>().is_err());
    }

    #[test]
    fn test_children_allowed_only_for_nestable_types() {
        assert!(CategoryType::Parent.allows_children());
        assert!(CategoryType::Product.allows_children());
        assert!(!CategoryType::Regular.allows_children());
        assert!(!CategoryType::News.allows_children());
    }

    #[test]
    fn test_childless_type_forced_to_root() {
        let placement = Placement::under(3, 1);
        assert_eq!(placement.level, 2);

        assert_eq!(placement.enforce_type(CategoryType::Regular), Placement::ROOT);
        assert_eq!(placement.enforce_type(CategoryType::News), Placement::ROOT);
        assert_eq!(placement.enforce_type(CategoryType::Product), placement);
    }

    #[test]
    fn test_parentless_nestable_type_is_level_zero() {
        let stray = Placement {
            parent_id: None,
            level: 4,
        };
        assert_eq!(stray.enforce_type(CategoryType::Parent), Placement::ROOT);
    }
}
