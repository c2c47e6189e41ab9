//! untwind Converter
//!
//! Turns Tailwind-annotated HTML into a nested SASS stylesheet plus an
//! HTML skeleton whose utility classes became structured selectors. One
//! annotation pass derives everything both outputs need, so the selector
//! written into the stylesheet always matches the class written into the
//! markup.
//!
//! ```text
//! HTML source → annotate() → annotated tree → { sass::generate, markup::generate }
//!             → format + repair passes → ConverterOutput { sass, html }
//! ```
//!
//! ```
//! use untwind_codegen::{convert_to_sass, ConvertOptions};
//!
//! let output = convert_to_sass(
//!     "<div class=\"w-72 h-40\">My Text 1</div>",
//!     &ConvertOptions::default(),
//! )
//! .unwrap()
//! .unwrap();
//! assert!(output.sass.contains("@apply w-72 h-40;"));
//! ```

pub mod annotate;
pub mod classlist;
pub mod classname;
pub mod format;
pub mod markup;
pub mod options;
pub mod postprocess;
pub mod sass;
pub mod slug;
pub mod text;

use std::collections::HashSet;

use untwind_parser::{ParseError, Parser};

use crate::annotate::TreeNode;

pub use options::{ClassNameOptions, ConvertOptions, FormatterOptions};

/// The paired result of one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterOutput {
    /// Nested stylesheet with `@apply` directives.
    pub sass: String,
    /// Markup skeleton with derived class names.
    pub html: String,
}

/// Conversion error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    /// The input did not tokenize or parse; no partial result exists.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// State scoped to a single conversion call.
///
/// The annotator fills `styles`, the stylesheet emitter fills
/// `suppressed`. A fresh context per call keeps concurrent conversions
/// from seeing each other's accumulators.
#[derive(Debug, Default)]
pub struct ConvertContext {
    /// `<style>` block contents in document order.
    pub styles: Vec<String>,
    /// Declaration bodies removed by duplicate-leaf suppression.
    pub suppressed: HashSet<String>,
}

impl ConvertContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Convert annotated HTML into a stylesheet and a rewritten skeleton.
///
/// Returns `Ok(None)` when the input is blank or contains no structural
/// element (text-only or `<style>`-only documents included). Parse
/// failures propagate unchanged.
pub fn convert_to_sass(
    html: &str,
    options: &ConvertOptions,
) -> Result<Option<ConverterOutput>, ConvertError> {
    if html.trim().is_empty() {
        return Ok(None);
    }

    let cleaned = text::normalize(html);
    let nodes = Parser::parse(&cleaned)?;

    let mut ctx = ConvertContext::new();
    let tree = annotate::annotate(nodes, &mut ctx);
    if !tree.iter().any(|node| matches!(node, TreeNode::Element(_))) {
        return Ok(None);
    }

    let mut stylesheet = sass::style_regions(&ctx.styles);
    stylesheet.push_str(&sass::generate(&tree, &mut ctx, options));
    let stylesheet = postprocess::strip_peer_tokens(&stylesheet);

    let skeleton = markup::generate(&tree, options);

    let (stylesheet, skeleton) = if options.format_output {
        let formatted = format::format_css(&stylesheet, &options.formatter_options);
        (
            postprocess::fix_apply_colon_breaks(&formatted),
            format::format_markup(&skeleton, &options.formatter_options),
        )
    } else {
        (stylesheet, skeleton)
    };

    Ok(Some(ConverterOutput {
        sass: stylesheet,
        html: skeleton,
    }))
}
