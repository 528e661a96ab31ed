mod category;

pub use category::{Category, CategoryType, LegacyCategory, Placement};
