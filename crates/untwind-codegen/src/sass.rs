//! Stylesheet emitter.
//!
//! Walks the annotated tree and emits one nested block per element:
//! an optional `/* name -> depth */` header, the derived selector, an
//! `@apply` line for the utility classes, inline-style declarations, and
//! the recursively emitted subtree. Group and peer variant tokens are
//! hoisted into `&:<modifier>` and sibling-combinator rules here; the
//! output is compact and left to the formatter for final layout.

use crate::annotate::{StyledElement, TreeNode};
use crate::classlist::order_classes;
use crate::classname::selector_for;
use crate::options::ConvertOptions;
use crate::text::ensure_suffix;
use crate::ConvertContext;

/// Hoisted rules for one variant modifier, in encounter order.
struct ModifierBucket {
    modifier: String,
    /// Target selector paired with the utilities to apply under it.
    rules: Vec<(String, Vec<String>)>,
}

/// Emit nested selector blocks for a sibling run of annotated nodes.
pub fn generate(nodes: &[TreeNode], ctx: &mut ConvertContext, options: &ConvertOptions) -> String {
    let mut out = String::new();
    let mut hoisted = String::new();

    for (index, node) in nodes.iter().enumerate() {
        let element = match node {
            TreeNode::Element(element) => element,
            TreeNode::Text(_) => continue,
        };

        let mut subtree = generate(&element.children, ctx, options);
        let mut class_list = element
            .class
            .as_deref()
            .map(|class| effective_class_list(class, options));

        // Hoist group-<modifier>:<utility> tokens found anywhere below a
        // `group` owner into &:<modifier> regions on the owner itself
        let mut group_regions = String::new();
        if has_token(class_list.as_deref(), "group") {
            let mut buckets = Vec::new();
            let mut consumed = Vec::new();
            collect_group_matches(&element.children, options, &mut buckets, &mut consumed);
            if !buckets.is_empty() {
                group_regions = render_group_regions(&buckets, options);
                class_list = class_list
                    .map(|list| remove_token(&list, "group"))
                    .filter(|list| !list.is_empty());
                for token in &consumed {
                    subtree = remove_apply_token(&subtree, token);
                }
                subtree = collapse_empty_applies(&subtree);
            }
        }

        // Hoist peer-<modifier>:<utility> tokens from following siblings
        // into sibling-combinator rules appended after this run
        if has_token(class_list.as_deref(), "peer") {
            let buckets = collect_peer_matches(&nodes[index + 1..], options);
            if !buckets.is_empty() {
                let owner = selector_for(element, options).to_string();
                hoisted.push_str(&render_peer_regions(&owner, &buckets, options));
                class_list = class_list
                    .map(|list| remove_token(&list, "peer"))
                    .filter(|list| !list.is_empty());
            }
        }

        let mut own = own_declarations(class_list.as_deref(), element.style.as_deref());

        // A leaf whose declarations repeat on the next sibling leaf is
        // suppressed; the run collapses onto its last member
        if options.prevent_duplicate_classes && !own.is_empty() && !element.has_element_children {
            if let Some(TreeNode::Element(next)) = nodes.get(index + 1) {
                if !next.has_element_children
                    && plain_declarations(next, options) == plain_declarations(element, options)
                {
                    ctx.suppressed.insert(plain_declarations(element, options));
                    own.clear();
                }
            }
        }

        if own.is_empty() && group_regions.is_empty() && subtree.is_empty() {
            continue;
        }

        if options.print_sass_comments {
            out.push_str(&comment_line(element));
        }
        out.push_str(&selector_for(element, options).to_string());
        out.push('{');
        out.push_str(&own);
        out.push_str(&group_regions);
        out.push_str(&subtree);
        out.push('}');
    }

    out.push_str(&hoisted);
    out
}

/// Render collected `<style>` blocks in numbered regions, for prepending
/// ahead of the selector tree.
pub fn style_regions(styles: &[String]) -> String {
    let mut out = String::new();
    for (index, style) in styles.iter().enumerate() {
        out.push_str(&format!("// #region STYLE #{}\n", index + 1));
        out.push('\n');
        out.push_str(style);
        out.push('\n');
        out.push_str("// #endregion\n\n");
    }
    out
}

/// `/* name -> depth */`, or `/* name */` for elements without a depth.
fn comment_line(element: &StyledElement) -> String {
    let label = element.comment.as_deref().unwrap_or(&element.tag_name);
    match element.order {
        Some(order) => format!("/* {label} -> {order} */"),
        None => format!("/* {label} */"),
    }
}

fn effective_class_list(class: &str, options: &ConvertOptions) -> String {
    if options.order_by_tailwind_classes {
        order_classes(class)
    } else {
        class.to_string()
    }
}

/// The element's own declaration run: `@apply` for classes, then inline
/// style text on its own lines.
fn own_declarations(class_list: Option<&str>, style: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(classes) = class_list {
        out.push_str("@apply ");
        out.push_str(classes);
        out.push(';');
    }
    if let Some(style) = style {
        out.push('\n');
        out.push_str(&ensure_suffix(style, ";"));
        out.push('\n');
    }
    out
}

/// Declarations before any token hoisting, used for duplicate detection.
fn plain_declarations(element: &StyledElement, options: &ConvertOptions) -> String {
    let class_list = element
        .class
        .as_deref()
        .map(|class| effective_class_list(class, options));
    own_declarations(class_list.as_deref(), element.style.as_deref())
}

fn has_token(class_list: Option<&str>, token: &str) -> bool {
    match class_list {
        Some(list) => list.split_whitespace().any(|t| t == token),
        None => false,
    }
}

/// Remove a literal token from a space-separated class list.
fn remove_token(class_list: &str, token: &str) -> String {
    class_list
        .split_whitespace()
        .filter(|t| *t != token)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a `<prefix><modifier>:<utility>` variant token.
fn split_variant_token<'a>(token: &'a str, prefix: &str) -> Option<(&'a str, &'a str)> {
    let rest = token.strip_prefix(prefix)?;
    let (modifier, utility) = rest.split_once(':')?;
    if modifier.is_empty() || utility.is_empty() {
        return None;
    }
    Some((modifier, utility))
}

fn push_match(buckets: &mut Vec<ModifierBucket>, modifier: &str, selector: &str, utility: &str) {
    let bucket = match buckets.iter().position(|b| b.modifier == modifier) {
        Some(index) => index,
        None => {
            buckets.push(ModifierBucket {
                modifier: modifier.to_string(),
                rules: Vec::new(),
            });
            buckets.len() - 1
        }
    };
    let rules = &mut buckets[bucket].rules;
    let rule = match rules.iter().position(|(s, _)| s.as_str() == selector) {
        Some(index) => index,
        None => {
            rules.push((selector.to_string(), Vec::new()));
            rules.len() - 1
        }
    };
    rules[rule].1.push(utility.to_string());
}

/// Scan a whole subtree for `group-<modifier>:<utility>` tokens.
fn collect_group_matches(
    nodes: &[TreeNode],
    options: &ConvertOptions,
    buckets: &mut Vec<ModifierBucket>,
    consumed: &mut Vec<String>,
) {
    for node in nodes {
        let element = match node {
            TreeNode::Element(element) => element,
            TreeNode::Text(_) => continue,
        };
        if let Some(class) = element.class.as_deref() {
            for token in class.split_whitespace() {
                if let Some((modifier, utility)) = split_variant_token(token, "group-") {
                    let selector = selector_for(element, options).to_string();
                    push_match(buckets, modifier, &selector, utility);
                    if !consumed.iter().any(|t| t == token) {
                        consumed.push(token.to_string());
                    }
                }
            }
        }
        collect_group_matches(&element.children, options, buckets, consumed);
    }
}

/// Scan direct following siblings for `peer-<modifier>:<utility>` tokens.
fn collect_peer_matches(siblings: &[TreeNode], options: &ConvertOptions) -> Vec<ModifierBucket> {
    let mut buckets = Vec::new();
    for node in siblings {
        let element = match node {
            TreeNode::Element(element) => element,
            TreeNode::Text(_) => continue,
        };
        if let Some(class) = element.class.as_deref() {
            for token in class.split_whitespace() {
                if let Some((modifier, utility)) = split_variant_token(token, "peer-") {
                    let selector = selector_for(element, options).to_string();
                    push_match(&mut buckets, modifier, &selector, utility);
                }
            }
        }
    }
    buckets
}

fn render_group_regions(buckets: &[ModifierBucket], options: &ConvertOptions) -> String {
    let mut out = String::new();
    for bucket in buckets {
        if options.print_sass_comments {
            out.push_str(&format!("/* #region Group modifier: {} */\n\n", bucket.modifier));
        }
        out.push_str(&format!("&:{}{{", bucket.modifier));
        for (selector, utilities) in &bucket.rules {
            out.push_str(&format!("{selector}{{@apply {};}}", utilities.join(" ")));
        }
        out.push('}');
        if options.print_sass_comments {
            out.push_str("\n\n/* #endregion */");
        }
        out.push_str("\n\n");
    }
    out
}

fn render_peer_regions(owner: &str, buckets: &[ModifierBucket], options: &ConvertOptions) -> String {
    let mut out = String::new();
    for bucket in buckets {
        if options.print_sass_comments {
            out.push_str(&format!("/* #region Peer modifier: {} */\n\n", bucket.modifier));
        }
        for (selector, utilities) in &bucket.rules {
            out.push_str(&format!(
                "{owner}:{} ~ {selector}{{@apply {};}}",
                bucket.modifier,
                utilities.join(" ")
            ));
        }
        if options.print_sass_comments {
            out.push_str("\n\n/* #endregion */");
        }
        out.push_str("\n\n");
    }
    out
}

/// Remove a class token from already-emitted `@apply` statements. Inside
/// an emitted block a token is always bounded by a leading space and a
/// trailing space or `;`, so whole-token replacement cannot clip a longer
/// token sharing the same prefix.
fn remove_apply_token(haystack: &str, token: &str) -> String {
    let spaced = format!(" {token} ");
    let terminal = format!(" {token};");
    let mut out = haystack.to_string();
    loop {
        let replaced = out.replace(&spaced, " ").replace(&terminal, ";");
        if replaced == out {
            return out;
        }
        out = replaced;
    }
}

/// Drop `@apply` statements left without any tokens.
fn collapse_empty_applies(haystack: &str) -> String {
    haystack.replace("@apply ;", "").replace("@apply;", "")
}
