//! Text cleanup helpers.
//!
//! Everything downstream of the parser assumes whitespace-collapsed text,
//! so the whole input as well as individual attribute and comment values
//! go through `normalize` before any other processing.

/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }

    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// [`normalize`], mapping blank input to `None`.
pub fn normalize_non_empty(text: &str) -> Option<String> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Append `suffix` unless the text already ends with it.
pub fn ensure_suffix(text: &str, suffix: &str) -> String {
    if text.ends_with(suffix) {
        text.to_string()
    } else {
        format!("{text}{suffix}")
    }
}
