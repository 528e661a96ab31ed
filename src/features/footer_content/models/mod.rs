mod footer_content;

pub use footer_content::FooterContent;
