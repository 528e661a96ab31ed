//! Slug generation for categories, posts and articles.
//!
//! Slugs are lower-case ASCII made of `[a-z0-9-]`. Vietnamese (and common
//! Latin-1) diacritics are folded to their base letter first so that
//! "Mẫu Thiết Kế" becomes "mau-thiet-ke" instead of losing its vowels.

/// Accented characters grouped by the ASCII letter they fold to
const FOLD_TABLE: &[(&str, char)] = &[
    ("àáảãạăằắẳẵặâầấẩẫậäåāą", 'a'),
    ("èéẻẽẹêềếểễệëēę", 'e'),
    ("ìíỉĩịîïī", 'i'),
    ("òóỏõọôồốổỗộơờớởỡợöøō", 'o'),
    ("ùúủũụưừứửữựûüū", 'u'),
    ("ỳýỷỹỵÿ", 'y'),
    ("đď", 'd'),
    ("çć", 'c'),
    ("ñń", 'n'),
    ("śš", 's'),
    ("źżž", 'z'),
];

fn fold_char(c: char) -> char {
    FOLD_TABLE
        .iter()
        .find(|(group, _)| group.contains(c))
        .map(|(_, base)| *base)
        .unwrap_or(c)
}

/// Derive a URL slug from a human readable name.
///
/// Whitespace, `-` and `_` become single hyphens, every other character that
/// is not `[a-z0-9]` after folding is dropped, and leading/trailing hyphens
/// are trimmed.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars().flat_map(char::to_lowercase).map(fold_char) {
        if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = !slug.is_empty();
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(c);
        }
    }

    slug
}

/// Prefix a child slug with its parent's slug unless it already carries it
pub fn with_parent_prefix(slug: &str, parent_slug: &str) -> String {
    let prefix = format!("{}-", parent_slug);
    if slug.starts_with(&prefix) {
        slug.to_string()
    } else {
        format!("{}{}", prefix, slug)
    }
}

/// The `attempt`-th disambiguated candidate: `base`, `base-1`, `base-2`, ...
pub fn numbered_candidate(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_vietnamese_names() {
        assert_eq!(slugify("Mẫu Thiết Kế"), "mau-thiet-ke");
        assert_eq!(slugify("Biệt Thự"), "biet-thu");
        assert_eq!(slugify("Tin Tức"), "tin-tuc");
        assert_eq!(slugify("Báo Chí"), "bao-chi");
        assert_eq!(slugify("Đường Phố"), "duong-pho");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("What's \"new\"?"), "whats-new");
        assert_eq!(slugify("v1.2 release"), "v12-release");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  a  -  b__c  "), "a-b-c");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_output_is_url_safe() {
        let slug = slugify("Nhà Phố 3 Tầng @ Hà Nội #2024");
        assert_eq!(slug, "nha-pho-3-tang-ha-noi-2024");
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn test_parent_prefix_applied_once() {
        assert_eq!(
            with_parent_prefix("biet-thu", "mau-thiet-ke"),
            "mau-thiet-ke-biet-thu"
        );
        assert_eq!(
            with_parent_prefix("mau-thiet-ke-biet-thu", "mau-thiet-ke"),
            "mau-thiet-ke-biet-thu"
        );
        // A bare match without the hyphen is not a prefix
        assert_eq!(
            with_parent_prefix("mau-thiet-kehouse", "mau-thiet-ke"),
            "mau-thiet-ke-mau-thiet-kehouse"
        );
    }

    #[test]
    fn test_numbered_candidates() {
        assert_eq!(numbered_candidate("mau-thiet-ke", 0), "mau-thiet-ke");
        assert_eq!(numbered_candidate("mau-thiet-ke", 1), "mau-thiet-ke-1");
        assert_eq!(numbered_candidate("mau-thiet-ke", 12), "mau-thiet-ke-12");
    }
}
