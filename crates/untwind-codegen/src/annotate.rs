//! Tree annotation pass.
//!
//! Normalizes the parsed node list into the converter's working tree:
//! drops doctypes and blank text, extracts `<style>` contents into the
//! conversion context, associates each comment with the element that
//! follows it, and records nesting depth per element. Both emitters walk
//! the same annotated tree, so selector derivation stays consistent
//! between the stylesheet and the rewritten markup.

use untwind_parser::{Attribute, Element, Node};

use crate::text;
use crate::ConvertContext;

/// A node in the annotated tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Element(StyledElement),
    Text(String),
}

/// An element enriched with everything the emitters need.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledElement {
    /// Lowercased tag name from the parser.
    pub tag_name: String,
    /// Source attributes in document order, untouched.
    pub attributes: Vec<Attribute>,
    /// Normalized `class` attribute, when present and non-blank.
    pub class: Option<String>,
    /// Normalized `style` attribute, when present and non-blank.
    pub style: Option<String>,
    /// Normalized text of the comment directly preceding this element.
    pub comment: Option<String>,
    /// Nesting depth, assigned only when the source element had children.
    pub order: Option<u32>,
    /// True when at least one annotated child is an element.
    pub has_element_children: bool,
    pub children: Vec<TreeNode>,
}

/// Annotate a parsed node list. Root elements get order 1.
pub fn annotate(nodes: Vec<Node>, ctx: &mut ConvertContext) -> Vec<TreeNode> {
    annotate_level(nodes, 1, ctx)
}

fn annotate_level(nodes: Vec<Node>, order: u32, ctx: &mut ConvertContext) -> Vec<TreeNode> {
    let mut out = Vec::new();
    let mut pending_comment: Option<String> = None;

    for node in nodes {
        match node {
            Node::Doctype(_) => {}
            Node::Comment(content) => {
                // The nearest comment wins; earlier ones are dropped
                pending_comment = text::normalize_non_empty(&content);
            }
            Node::Text(content) => {
                if content.trim().is_empty() {
                    continue;
                }
                // Real text sits between a comment and any later element,
                // so it breaks the association
                pending_comment = None;
                out.push(TreeNode::Text(content));
            }
            Node::Element(element) => {
                if element.tag_name == "style" {
                    ctx.styles.push(style_content(&element));
                    continue;
                }
                let comment = pending_comment.take();
                out.push(TreeNode::Element(annotate_element(element, comment, order, ctx)));
            }
        }
    }

    out
}

fn annotate_element(
    element: Element,
    comment: Option<String>,
    order: u32,
    ctx: &mut ConvertContext,
) -> StyledElement {
    let class = element.attribute("class").and_then(text::normalize_non_empty);
    let style = element.attribute("style").and_then(text::normalize_non_empty);

    // Depth is assigned off the raw child list; annotation may empty it
    let had_children = !element.children.is_empty();
    let children = annotate_level(element.children, order + 1, ctx);
    let has_element_children = children
        .iter()
        .any(|child| matches!(child, TreeNode::Element(_)));

    StyledElement {
        tag_name: element.tag_name,
        attributes: element.attributes,
        class,
        style,
        comment,
        order: if had_children { Some(order) } else { None },
        has_element_children,
        children,
    }
}

/// Joined text content of a `<style>` element.
fn style_content(element: &Element) -> String {
    let mut content = String::new();
    for child in &element.children {
        if let Node::Text(text) = child {
            content.push_str(text);
        }
    }
    content.trim().to_string()
}
