use untwind_lexer::{is_void_element, Scanner, Token, TokenKind};

use crate::ast::{Element, Node};
use crate::ParseError;

/// Tree builder over the lexer's token stream.
///
/// Tolerant in the same places browsers are:
/// - void elements never take children and never expect a close tag
/// - a close tag with no matching open element is dropped
/// - a close tag implicitly closes any elements left open inside it
/// - elements still open at end of input are closed silently
///
/// Errors come only from the lexer (positions carried through unchanged).
pub struct Parser;

impl Parser {
    /// Parse HTML source into a list of root nodes.
    pub fn parse(source: &str) -> Result<Vec<Node>, ParseError> {
        let tokens = Scanner::tokenize(source)?;
        Ok(Self::build(tokens))
    }

    /// Fold the token stream into a tree using an open-element stack.
    fn build(tokens: Vec<Token>) -> Vec<Node> {
        let mut roots: Vec<Node> = Vec::new();
        let mut stack: Vec<Element> = Vec::new();

        for token in tokens {
            match token.kind {
                TokenKind::Text(content) => {
                    Self::append(&mut roots, &mut stack, Node::Text(content));
                }
                TokenKind::Comment(content) => {
                    Self::append(&mut roots, &mut stack, Node::Comment(content));
                }
                TokenKind::Doctype(content) => {
                    Self::append(&mut roots, &mut stack, Node::Doctype(content));
                }
                TokenKind::OpenTag {
                    name,
                    attributes,
                    self_closing,
                } => {
                    let element = Element {
                        tag_name: name,
                        attributes,
                        children: Vec::new(),
                    };
                    if self_closing || is_void_element(&element.tag_name) {
                        Self::append(&mut roots, &mut stack, Node::Element(element));
                    } else {
                        stack.push(element);
                    }
                }
                TokenKind::CloseTag(name) => {
                    Self::close(&mut roots, &mut stack, &name);
                }
                TokenKind::Eof => break,
            }
        }

        // end of input closes whatever is still open
        while let Some(element) = stack.pop() {
            Self::append(&mut roots, &mut stack, Node::Element(element));
        }

        roots
    }

    /// Attach a finished node to the innermost open element, or the root list.
    fn append(roots: &mut Vec<Node>, stack: &mut Vec<Element>, node: Node) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }

    /// Close the nearest open element with the given tag. Elements opened
    /// inside it are closed first; an unmatched close tag is a no-op.
    fn close(roots: &mut Vec<Node>, stack: &mut Vec<Element>, name: &str) {
        let Some(depth) = stack.iter().rposition(|e| e.tag_name == name) else {
            return;
        };
        while stack.len() > depth {
            if let Some(element) = stack.pop() {
                Self::append(roots, stack, Node::Element(element));
            }
        }
    }
}
