//! untwind HTML Parser
//!
//! Builds a raw markup tree from the lexer's token stream. The tree keeps
//! everything the source had — elements, text runs, comments, doctype —
//! so the converter can decide what is structural and what is metadata.
//! Recovery from sloppy markup (unclosed elements, stray close tags)
//! happens here; hard failures are lexer errors passed through with their
//! positions.

pub mod ast;
pub mod parser;

pub use ast::{Attribute, Element, Node};
pub use parser::Parser;

use untwind_lexer::LexerError;

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<LexerError> for ParseError {
    fn from(err: LexerError) -> Self {
        Self {
            message: err.message,
            line: err.line,
            column: err.column,
        }
    }
}
