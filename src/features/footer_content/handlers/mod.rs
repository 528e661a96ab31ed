mod footer_content_handler;

pub use footer_content_handler::*;
