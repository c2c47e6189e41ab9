//! Output repair passes.
//!
//! Two string-level fix-ups run after the tree walks because the damage
//! they undo is not local to any one block: the stylesheet formatter's
//! colon rule splits `@apply` variant tokens on every line it touches,
//! and `peer-*` tokens can survive anywhere in the document when their
//! owner never matched. Both passes are deliberately narrow so they
//! cannot disturb pseudo-selectors or inline-style declarations.

use once_cell::sync::Lazy;
use regex::Regex;

/// `word: word` inside an `@apply` statement, the shape the colon
/// normalizer leaves behind when it splits `hover:shadow-xl`.
static APPLY_COLON_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\w-]): ([\w-])").unwrap());

/// A residual `peer-<modifier>:<utility>` token with any leading space.
static PEER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*peer-[\w-]+:[^\s;{}]+").unwrap());

/// Rejoin `@apply` variant tokens the stylesheet formatter split apart.
///
/// Only lines carrying an `@apply` statement are touched; a `hover: b`
/// shape elsewhere (a real declaration, a pseudo-selector) stays as the
/// formatter laid it out.
pub fn fix_apply_colon_breaks(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    for (index, line) in css.lines().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        if line.trim_start().starts_with("@apply ") {
            out.push_str(&APPLY_COLON_SPLIT.replace_all(line, "$1:$2"));
        } else {
            out.push_str(line);
        }
    }
    if css.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Remove every `peer-<modifier>:<utility>` token left in the assembled
/// stylesheet, then drop `@apply` statements the removal emptied out.
///
/// Peer matches are sibling-scoped, so a token can sit arbitrarily far
/// from the owner that consumed it; one whole-document pass is the only
/// place all of them are visible at once.
pub fn strip_peer_tokens(css: &str) -> String {
    let stripped = PEER_TOKEN.replace_all(css, "").to_string();
    stripped.replace("@apply ;", "").replace("@apply;", "")
}
