//! Slug generation shared by posts and partners

/// Generate a URL slug from a name.
///
/// ASCII letters and digits are lowercased, non-ASCII letters (Arabic
/// titles) are kept, and every other character becomes a single hyphen.
pub fn generate_slug(name: &str) -> String {
    let mut result = String::new();
    let mut prev_hyphen = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || (!c.is_ascii() && c.is_alphanumeric()) {
            result.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen && !result.is_empty() {
            result.push('-');
            prev_hyphen = true;
        }
    }

    result.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_generate_slug_simple() {
        assert_eq!(generate_slug("Hello World"), "hello-world");
    }

    #[test]
    fn test_generate_slug_with_special_chars() {
        assert_eq!(generate_slug("ELS Language Centres (KL)!"), "els-language-centres-kl");
    }

    #[test]
    fn test_generate_slug_collapses_separators() {
        assert_eq!(generate_slug("  Asia_Pacific -- University  "), "asia-pacific-university");
    }

    #[test]
    fn test_generate_slug_keeps_arabic() {
        assert_eq!(generate_slug("جامعة ملايا"), "جامعة-ملايا");
    }

    #[test]
    fn test_generate_slug_empty() {
        assert_eq!(generate_slug("!!!"), "");
        assert_eq!(generate_slug(""), "");
    }

    proptest! {
        #[test]
        fn slug_has_no_edge_or_double_hyphens(name in "\\PC{0,40}") {
            let slug = generate_slug(&name);
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }
    }
}
