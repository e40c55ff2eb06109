// src/html/content_type.rs
// =============================================================================
// Decides whether a response body is HTML by looking at its Content-Type.
//
// Only HTML bodies are handed to the transform hook and the link extractor.
// Everything else (images, JSON, plain text, ...) is emitted as-is with no
// discovered links.
//
// Accepted: "text/" + any word characters + "html", e.g.
//   text/html, text/html; charset=utf-8, TEXT/HTML, text/xhtml
// =============================================================================

use std::collections::BTreeMap;

// Checks a response's headers for an HTML content type
//
// Header names are expected in lowercase (that is how HttpResponse stores them).
// A missing header counts as "not HTML".
pub fn is_html(headers: &BTreeMap<String, String>) -> bool {
    headers
        .get("content-type")
        .map(|value| is_html_content_type(value))
        .unwrap_or(false)
}

// Checks a single Content-Type value
//
// Parameters after ';' (charset, boundary, ...) are ignored and the
// comparison is case-insensitive.
pub fn is_html_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    let middle = match essence
        .strip_prefix("text/")
        .and_then(|rest| rest.strip_suffix("html"))
    {
        Some(middle) => middle,
        None => return false,
    };

    middle
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
