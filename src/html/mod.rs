// src/html/mod.rs
// =============================================================================
// Everything the crawler does with a response body.
//
// Submodules:
// - content_type: is this response HTML at all?
// - transform: the caller's hook that rewrites HTML before link discovery
// - links: pulls href values out of (transformed) HTML
// =============================================================================

mod content_type;
mod links;
pub mod transform;

pub use content_type::{is_html, is_html_content_type};
pub use links::extract_links;
pub use transform::TransformHtml;
