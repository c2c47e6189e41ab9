/// A position in source text, tracking line and column for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// A single attribute from an opening tag.
///
/// `value` is `None` for bare boolean attributes (`<input disabled>`);
/// quoting is stripped, the raw text inside the quotes is kept untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Token classification for HTML source.
///
/// Data-carrying variants embed their value directly (no separate `value`
/// field on Token).
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Character data between tags. Raw `<style>`/`<script>` content is a
    /// single Text token.
    Text(String),
    /// `<!-- ... -->` with the delimiters stripped and content untrimmed.
    Comment(String),
    /// `<!DOCTYPE html>` and friends, content between `<!` and `>`.
    Doctype(String),
    /// An opening tag with its attributes in source order.
    OpenTag {
        name: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
    },
    /// A closing tag (`</div>`).
    CloseTag(String),

    /// End of input.
    Eof,
}

/// A token produced by the HTML lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// HTML5 void elements (self-closing, no children).
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Check if a tag name is an HTML5 void element. Case-insensitive.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

/// Elements whose content is raw text: no tags or comments are recognized
/// inside them until the matching close tag.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["style", "script"];

/// Check if a tag's content must be scanned as raw text.
pub fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}
