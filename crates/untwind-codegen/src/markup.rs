//! Markup re-emitter.
//!
//! Walks the same annotated tree as the stylesheet emitter and rebuilds
//! the HTML with original attributes minus `class` and `style`, adding a
//! single derived class where the selector is class-form. Output is one
//! tag per line with blank lines between differing siblings; the markup
//! formatter handles indentation afterwards.

use untwind_lexer::is_void_element;

use crate::annotate::{StyledElement, TreeNode};
use crate::classname::{selector_for, Selector};
use crate::options::ConvertOptions;
use crate::text;

/// Re-emit the annotated tree as an HTML skeleton.
pub fn generate(nodes: &[TreeNode], options: &ConvertOptions) -> String {
    let mut out = String::new();
    render_siblings(nodes, options, &mut out);
    out
}

fn render_siblings(nodes: &[TreeNode], options: &ConvertOptions, out: &mut String) {
    let mut previous: Option<&StyledElement> = None;

    for node in nodes {
        let element = match node {
            TreeNode::Element(element) => element,
            TreeNode::Text(_) => continue,
        };
        if let Some(prev) = previous {
            // Runs of the same tag stay tight; anything else gets a blank line
            let tight = prev.tag_name == element.tag_name && element.comment.is_none();
            out.push_str(if tight { "\n" } else { "\n\n" });
        }
        render_element(element, options, out);
        previous = Some(element);
    }
}

fn render_element(element: &StyledElement, options: &ConvertOptions, out: &mut String) {
    if options.print_html_comments {
        if let Some(comment) = &element.comment {
            out.push_str(&format!("<!-- {comment} -->\n"));
        }
    }

    out.push('<');
    out.push_str(&element.tag_name);
    for attribute in &element.attributes {
        if attribute.key == "class" || attribute.key == "style" {
            continue;
        }
        match &attribute.value {
            Some(value) => out.push_str(&format!(" {}=\"{}\"", attribute.key, value)),
            None => out.push_str(&format!(" {}", attribute.key)),
        }
    }
    if let Selector::Class(name) = selector_for(element, options) {
        out.push_str(&format!(" class=\"{name}\""));
    }

    if is_void_element(&element.tag_name) {
        out.push_str(" />");
        return;
    }
    out.push('>');

    if element.has_element_children {
        out.push('\n');
        render_siblings(&element.children, options, out);
        out.push('\n');
    } else if let Some(inline) = inline_text(element) {
        out.push('\n');
        out.push_str(&inline);
        out.push('\n');
    }

    out.push_str(&format!("</{}>", element.tag_name));
}

/// Merged text content for elements whose children are all text.
fn inline_text(element: &StyledElement) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for child in &element.children {
        match child {
            TreeNode::Text(content) => parts.push(content),
            TreeNode::Element(_) => return None,
        }
    }
    text::normalize_non_empty(&parts.join(" "))
}
