//! Raw markup tree.
//!
//! The tree the parser hands to the converter, before any annotation.
//! Each variant carries exactly the fields that exist for it; derived
//! conversion metadata (comments, ordering, filtered attributes) lives on
//! the annotated tree in `untwind-codegen`, not here.

pub use untwind_lexer::Attribute;

/// A node in the raw markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An element with its attributes and child nodes.
    Element(Element),

    /// A text run, whitespace preserved as tokenized.
    Text(String),

    /// An HTML comment with delimiters stripped.
    Comment(String),

    /// A doctype declaration.
    Doctype(String),
}

impl Node {
    /// Borrow the element payload when this node is an element.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// An element node. Tag names and attribute keys are lowercase; attribute
/// order is source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag_name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Look up an attribute value by key. Bare boolean attributes yield `None`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .and_then(|a| a.value.as_deref())
    }
}
