use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for client-supplied slugs
    /// Must be lowercase alphanumeric with single hyphens between segments
    /// - Valid: "mau-thiet-ke", "tin-tuc-2024", "a"
    /// - Invalid: "-slug", "slug-", "slug--name", "Slug", "slug_name"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Accepts an empty slug (meaning "derive it") or a well-formed one
pub fn validate_optional_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() || SLUG_REGEX.is_match(slug) {
        Ok(())
    } else {
        Err(ValidationError::new("slug")
            .with_message("slug may only contain a-z, 0-9 and single hyphens".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("mau-thiet-ke"));
        assert!(SLUG_REGEX.is_match("tin-tuc-2024"));
        assert!(SLUG_REGEX.is_match("a"));
        assert!(SLUG_REGEX.is_match("mau-thiet-ke-1"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-slug")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("slug-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("slug--name")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Slug")); // uppercase
        assert!(!SLUG_REGEX.is_match("slug_name")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
        assert!(!SLUG_REGEX.is_match("mẫu")); // non-ascii
    }

    #[test]
    fn test_optional_slug_accepts_empty() {
        assert!(validate_optional_slug("").is_ok());
        assert!(validate_optional_slug("biet-thu").is_ok());
        assert!(validate_optional_slug("Biet Thu").is_err());
    }
}
