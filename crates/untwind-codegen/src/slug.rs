//! Comment-to-slug conversion.
//!
//! Turns free-form comment text like `<!-- ===== Pricing Section ===== -->`
//! into an identifier usable as a CSS class name. URLs are stripped first
//! so a trailing link never leaks into a selector.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::options::ClassNameOptions;

/// Scheme-optional URL shapes, including bare `www.` hosts and naked domains.
static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(http(s)?://.)?(www\.)?[-a-zA-Z0-9@:%._\+~#=]{2,256}\.[a-z]{2,6}\b([-a-zA-Z0-9@:%_\+.~#?&/=]*)",
    )
    .unwrap()
});

/// Remove every URL-shaped substring.
pub fn remove_url(text: &str) -> String {
    URL.replace_all(text, "").to_string()
}

/// Build an identifier-safe slug from free text.
///
/// Whitespace runs become the replacement char, anything outside
/// `[A-Za-z0-9_-]` is dropped, runs of the replacement collapse, and
/// leading or trailing separators are trimmed. Blank or all-symbol
/// input yields an empty slug.
pub fn slugify(text: &str, options: &ClassNameOptions) -> String {
    let replacement = options.replacement_char();
    let source = if options.lowercase {
        text.to_lowercase()
    } else {
        text.to_string()
    };

    let mut slug = String::with_capacity(source.len());
    let mut last_was_replacement = false;
    for ch in source.trim().chars() {
        if ch.is_whitespace() {
            if !last_was_replacement {
                slug.push(replacement);
                last_was_replacement = true;
            }
        } else if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            slug.push(ch);
            last_was_replacement = ch == replacement;
        }
        // other chars are dropped without breaking the current run
    }

    let mut collapsed = String::with_capacity(slug.len());
    let mut previous: Option<char> = None;
    for ch in slug.chars() {
        if ch == replacement && previous == Some(replacement) {
            continue;
        }
        collapsed.push(ch);
        previous = Some(ch);
    }

    collapsed
        .trim_matches(|c: char| c == '-' || c == replacement)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // =========================================================================
    // remove_url
    // =========================================================================

    #[test]
    fn test_remove_full_url() {
        assert_eq!(remove_url("see https://example.com now"), "see  now");
    }

    #[test]
    fn test_remove_www_url() {
        assert_eq!(remove_url("www.example.com/path?q=1"), "");
    }

    #[test]
    fn test_remove_bare_domain() {
        assert_eq!(remove_url("example.com"), "");
    }

    #[test]
    fn test_keeps_plain_text() {
        assert_eq!(remove_url("Pricing Section Start"), "Pricing Section Start");
    }

    // =========================================================================
    // slugify
    // =========================================================================

    fn default_options() -> ClassNameOptions {
        ClassNameOptions::default()
    }

    #[test]
    fn test_slug_strips_decoration() {
        assert_eq!(
            slugify(" ====== Pricing Section Start ", &default_options()),
            "pricing-section-start"
        );
    }

    #[test]
    fn test_slug_with_url_removed_first() {
        let cleaned = remove_url(" ====== Pricing Section Start url: https://example.com ");
        assert_eq!(slugify(&cleaned, &default_options()), "pricing-section-start-url");
    }

    #[test]
    fn test_slug_underscore_replacement() {
        let options = ClassNameOptions {
            replacement: "_".to_string(),
            ..Default::default()
        };
        assert_eq!(slugify("Some Div", &options), "some_div");
    }

    #[test]
    fn test_slug_preserves_case_when_lowercase_off() {
        let options = ClassNameOptions {
            lowercase: false,
            ..Default::default()
        };
        assert_eq!(slugify("Some Div", &options), "Some-Div");
    }

    #[test]
    fn test_slug_collapses_replacement_runs() {
        assert_eq!(slugify("a & b", &default_options()), "a-b");
        assert_eq!(slugify("a   -   b", &default_options()), "a-b");
    }

    #[test]
    fn test_slug_all_symbols_is_empty() {
        assert_eq!(slugify("======", &default_options()), "");
        assert_eq!(slugify("***!!!", &default_options()), "");
        assert_eq!(slugify("", &default_options()), "");
    }

    #[test]
    fn test_slug_keeps_digits_and_underscores() {
        assert_eq!(slugify("Step 2_b", &default_options()), "step-2_b");
    }
}
