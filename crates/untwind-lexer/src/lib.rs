//! untwind HTML Lexer
//!
//! Tokenizes HTML source into a flat stream of tokens: text runs, comments,
//! doctype declarations, and open/close tags with their attribute lists.
//! The scanner is lenient the way browsers are — stray `<` characters
//! become text, attribute values may be quoted or bare, and `<style>`/
//! `<script>` content is consumed verbatim — so that utility-class
//! prototypes copied out of real pages tokenize without fuss.
//!
//! # Example
//!
//! ```
//! use untwind_lexer::Scanner;
//!
//! let tokens = Scanner::tokenize("<div class=\"bg-white\">hi</div>").unwrap();
//! assert_eq!(tokens.len(), 4); // open tag, text, close tag, EOF
//! ```

pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::{
    is_raw_text_element, is_void_element, Attribute, Span, Token, TokenKind, RAW_TEXT_ELEMENTS,
    VOID_ELEMENTS,
};

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Lexer error at line {line}, column {column}: {message}")]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
