mod category_service;
pub mod tree;

pub use category_service::CategoryService;
