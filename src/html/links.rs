// src/html/links.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Unlike a link checker, a crawler hands links back exactly as written:
// relative hrefs stay relative. Resolving them is up to the transform hook
// or whoever consumes the crawl results.
// =============================================================================

use lazy_static::lazy_static;
use scraper::{Html, Selector};

lazy_static! {
    // Every element carrying an href: <a>, <area>, <link>, <base>, ...
    static ref HREF_SELECTOR: Selector = Selector::parse("[href]").unwrap();
}

// Extracts all href values from HTML content
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//
// Returns: Vec<String> of href values in document order, duplicates kept
//
// Example:
//   html = "<a href='/docs'>Docs</a><a href='/docs'>Again</a>"
//   result = ["/docs", "/docs"]
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&HREF_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        // An empty entry would read as "frontier exhausted" once popped
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is lazy_static!?
//    - Creates a value the first time it is used, then reuses it
//    - Parsing a CSS selector is cheap, but there's no reason to redo it
//      for every page we crawl
//
// 2. Why unwrap() on the selector?
//    - Selector::parse can fail if the CSS selector is invalid
//    - Our selector "[href]" is constant and known to be valid
//    - User-supplied selectors (see transform.rs) return errors instead
//
// 3. What does filter_map do?
//    - It maps each item to an Option and keeps only the Some values
//    - Here: elements without an href are skipped
// -----------------------------------------------------------------------------
