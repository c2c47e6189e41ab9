//! Conversion options.
//!
//! All options deserialize from JSON with the camelCase field names the
//! web playground sends, and every field falls back to its default when
//! absent, so a partial config object is always valid.

use serde::{Deserialize, Serialize};

/// Top-level switches for a single conversion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    /// Run the pretty-printers over both outputs.
    pub format_output: bool,
    /// Derive class names from preceding comments when possible.
    pub use_comment_blocks_as_class_name: bool,
    /// Hard cap on the slug portion of a derived class name.
    pub max_class_name_length: usize,
    /// Keep comments in the rewritten HTML.
    pub print_html_comments: bool,
    /// Emit `/* name -> depth */` headers and region markers in the stylesheet.
    pub print_sass_comments: bool,
    /// Collapse a leaf whose declarations repeat on the next sibling leaf.
    pub prevent_duplicate_classes: bool,
    /// Sort utility classes before emission.
    pub order_by_tailwind_classes: bool,
    pub class_name_options: ClassNameOptions,
    pub formatter_options: FormatterOptions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            format_output: true,
            use_comment_blocks_as_class_name: true,
            max_class_name_length: 50,
            print_html_comments: true,
            print_sass_comments: true,
            prevent_duplicate_classes: true,
            order_by_tailwind_classes: false,
            class_name_options: ClassNameOptions::default(),
            formatter_options: FormatterOptions::default(),
        }
    }
}

/// How comment text becomes a class name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassNameOptions {
    pub lowercase: bool,
    /// Stands in for whitespace runs inside the slug.
    pub replacement: String,
    pub prefix: String,
    pub suffix: String,
}

impl Default for ClassNameOptions {
    fn default() -> Self {
        Self {
            lowercase: true,
            replacement: "-".to_string(),
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl ClassNameOptions {
    /// First char of the configured replacement, `-` when empty.
    pub fn replacement_char(&self) -> char {
        self.replacement.chars().next().unwrap_or('-')
    }
}

/// Pretty-printer knobs, shared by the stylesheet and markup formatters.
/// Field names stay snake_case to match the usual beautifier configs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterOptions {
    pub indent_size: usize,
    pub indent_char: String,
    pub preserve_newlines: bool,
    pub max_preserve_newlines: usize,
    pub newline_between_rules: bool,
    pub end_with_newline: bool,
    pub indent_inner_html: bool,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            indent_size: 4,
            indent_char: " ".to_string(),
            preserve_newlines: true,
            max_preserve_newlines: 5,
            newline_between_rules: true,
            end_with_newline: false,
            indent_inner_html: false,
        }
    }
}

impl FormatterOptions {
    /// One level of indentation.
    pub fn indent(&self) -> String {
        self.indent_char.repeat(self.indent_size)
    }
}
