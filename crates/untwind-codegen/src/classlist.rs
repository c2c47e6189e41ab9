//! Utility class list transforms.
//!
//! Both transforms preserve every token; they only change ordering.

/// Sort utility tokens bytewise and rejoin with single spaces.
pub fn order_classes(classes: &str) -> String {
    let mut tokens: Vec<&str> = classes.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Cluster utility tokens by base utility name, keeping first-seen
/// cluster order, or sorting clusters by name when `sort_groups` is set.
/// Tokens inside a cluster keep their relative order.
pub fn group_classes(classes: &str, sort_groups: bool) -> String {
    let mut clusters: Vec<(String, Vec<&str>)> = Vec::new();

    for token in classes.split_whitespace() {
        let key = cluster_key(token);
        match clusters.iter_mut().find(|(k, _)| *k == key) {
            Some((_, tokens)) => tokens.push(token),
            None => clusters.push((key, vec![token])),
        }
    }

    if sort_groups {
        clusters.sort_by(|a, b| a.0.cmp(&b.0));
    }

    clusters
        .iter()
        .flat_map(|(_, tokens)| tokens.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Base utility name of a token: the leading alphanumeric run of the
/// segment after the last variant prefix, ignoring a negative-value dash.
/// `hover:text-lg`, `text-xs` and `-text-1` all key as `text`.
fn cluster_key(token: &str) -> String {
    let base = match token.rsplit(':').next() {
        Some(base) => base,
        None => token,
    };
    let base = base.strip_prefix('-').unwrap_or(base);
    base.chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect()
}
