//! Selector derivation.
//!
//! Every element gets exactly one selector, derived the same way for the
//! stylesheet and the rewritten markup: a slug of the preceding comment
//! when one is usable, the bare tag for structural tags and childless
//! non-div leaves, and a positional `class-<tag>-<depth>` name otherwise.

use std::fmt;

use crate::annotate::StyledElement;
use crate::options::ConvertOptions;
use crate::slug::{remove_url, slugify};

/// Tags that always keep their bare tag selector.
const EXEMPT_TAGS: &[&str] = &["html", "head", "body", "style"];

/// A derived selector, in class form (`.name`) or bare tag form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Class(String),
    Tag(String),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Class(name) => write!(f, ".{name}"),
            Selector::Tag(name) => write!(f, "{name}"),
        }
    }
}

/// Derive the selector for an element at the given depth.
pub fn get_class_name(element: &StyledElement, depth: u32, options: &ConvertOptions) -> Selector {
    if options.use_comment_blocks_as_class_name {
        if let Some(comment) = &element.comment {
            let slug = slugify(&remove_url(comment), &options.class_name_options);
            if !slug.is_empty() {
                let truncated: String =
                    slug.chars().take(options.max_class_name_length).collect();
                return Selector::Class(format!(
                    "{}{}{}",
                    options.class_name_options.prefix, truncated, options.class_name_options.suffix
                ));
            }
        }
    }

    let tag = element.tag_name.as_str();
    if EXEMPT_TAGS.contains(&tag) || (!element.has_element_children && tag != "div") {
        return Selector::Tag(element.tag_name.clone());
    }

    if depth > 0 {
        Selector::Class(format!("class-{tag}-{depth}"))
    } else {
        Selector::Class(format!("class-{tag}"))
    }
}

/// [`get_class_name`] with the depth taken from the element's own order.
pub fn selector_for(element: &StyledElement, options: &ConvertOptions) -> Selector {
    get_class_name(element, element.order.unwrap_or(0), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ClassNameOptions;
    use pretty_assertions::assert_eq;

    fn element(tag: &str) -> StyledElement {
        StyledElement {
            tag_name: tag.to_string(),
            attributes: Vec::new(),
            class: None,
            style: None,
            comment: None,
            order: None,
            has_element_children: false,
            children: Vec::new(),
        }
    }

    fn parent(tag: &str) -> StyledElement {
        StyledElement {
            has_element_children: true,
            ..element(tag)
        }
    }

    fn with_comment(tag: &str, comment: &str) -> StyledElement {
        StyledElement {
            comment: Some(comment.to_string()),
            ..element(tag)
        }
    }

    // =========================================================================
    // Comment-derived names
    // =========================================================================

    #[test]
    fn test_comment_slug_wins() {
        let selector = get_class_name(&with_comment("div", "Some Div"), 1, &ConvertOptions::default());
        assert_eq!(selector, Selector::Class("some-div".to_string()));
    }

    #[test]
    fn test_comment_prefix_suffix_and_replacement() {
        let options = ConvertOptions {
            class_name_options: ClassNameOptions {
                replacement: "_".to_string(),
                prefix: "pre_".to_string(),
                suffix: "_suf".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let selector = get_class_name(&with_comment("div", "Some Div"), 1, &options);
        assert_eq!(selector.to_string(), ".pre_some_div_suf");
    }

    #[test]
    fn test_comment_truncated_before_wrapping() {
        let options = ConvertOptions {
            max_class_name_length: 4,
            class_name_options: ClassNameOptions {
                suffix: "-end".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let selector = get_class_name(&with_comment("div", "Container"), 1, &options);
        assert_eq!(selector, Selector::Class("cont-end".to_string()));
    }

    #[test]
    fn test_comment_url_stripped() {
        let selector = get_class_name(
            &with_comment("div", "Hero https://example.com"),
            1,
            &ConvertOptions::default(),
        );
        assert_eq!(selector, Selector::Class("hero".to_string()));
    }

    #[test]
    fn test_all_symbol_comment_falls_through() {
        let selector = get_class_name(&with_comment("span", "======"), 1, &ConvertOptions::default());
        assert_eq!(selector, Selector::Tag("span".to_string()));
    }

    #[test]
    fn test_comment_naming_disabled() {
        let options = ConvertOptions {
            use_comment_blocks_as_class_name: false,
            ..Default::default()
        };
        let mut styled = with_comment("div", "Some Div");
        styled.has_element_children = true;
        assert_eq!(
            get_class_name(&styled, 2, &options),
            Selector::Class("class-div-2".to_string())
        );
    }

    // =========================================================================
    // Tag and positional fallbacks
    // =========================================================================

    #[test]
    fn test_exempt_tags_stay_tags() {
        for tag in ["html", "head", "body", "style"] {
            assert_eq!(
                get_class_name(&parent(tag), 1, &ConvertOptions::default()),
                Selector::Tag(tag.to_string())
            );
        }
    }

    #[test]
    fn test_leaf_non_div_uses_tag() {
        assert_eq!(
            get_class_name(&element("span"), 2, &ConvertOptions::default()),
            Selector::Tag("span".to_string())
        );
    }

    #[test]
    fn test_leaf_div_uses_positional_name() {
        assert_eq!(
            get_class_name(&element("div"), 1, &ConvertOptions::default()),
            Selector::Class("class-div-1".to_string())
        );
    }

    #[test]
    fn test_positional_name_without_depth() {
        assert_eq!(
            get_class_name(&element("div"), 0, &ConvertOptions::default()),
            Selector::Class("class-div".to_string())
        );
    }

    #[test]
    fn test_parent_uses_positional_name() {
        assert_eq!(
            get_class_name(&parent("section"), 3, &ConvertOptions::default()),
            Selector::Class("class-section-3".to_string())
        );
    }

    // =========================================================================
    // Display
    // =========================================================================

    #[test]
    fn test_display_forms() {
        assert_eq!(Selector::Class("foo".to_string()).to_string(), ".foo");
        assert_eq!(Selector::Tag("span".to_string()).to_string(), "span");
    }
}
