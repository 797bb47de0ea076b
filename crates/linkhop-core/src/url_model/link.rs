//! Forwarding suffix.

/// Append the `link` suffix to a resolved URL.
///
/// Plain concatenation: no separator is inserted and nothing is normalized.
/// A missing or empty suffix leaves the URL unchanged.
pub fn append_link(resolved: &str, link: Option<&str>) -> String {
    match link {
        Some(suffix) if !suffix.is_empty() => format!("{}{}", resolved, suffix),
        _ => resolved.to_string(),
    }
}
