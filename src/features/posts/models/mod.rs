mod post;

pub use post::PostWithCategory;
