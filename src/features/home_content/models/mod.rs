mod home_content;

pub use home_content::HomeContent;
