/// Default page size for paginated article listings
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Category type that may hold child categories (legacy name)
pub const CATEGORY_TYPE_PARENT: &str = "parent";

/// Category type that may hold child categories
pub const CATEGORY_TYPE_PRODUCT: &str = "product";

/// Category type that is always a root (legacy name)
pub const CATEGORY_TYPE_REGULAR: &str = "regular";

/// Category type that is always a root
pub const CATEGORY_TYPE_NEWS: &str = "news";
