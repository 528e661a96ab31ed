mod home_content_handler;

pub use home_content_handler::*;
