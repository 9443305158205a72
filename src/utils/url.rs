// src/utils/url.rs

//! URL helpers for encyclopedia links.

/// Whether an href points at a content page.
///
/// Content pages live under `/wiki/` and carry no namespace prefix, so any
/// `:` (including one from a scheme) rules the link out.
pub fn is_article_href(href: &str) -> bool {
    href.contains("/wiki/") && !href.contains(':')
}

/// Prefix protocol-relative URLs (`//host/path`) with `https:`.
pub fn normalize_protocol_relative(src: &str) -> String {
    if src.starts_with("//") {
        format!("https:{src}")
    } else {
        src.to_string()
    }
}
