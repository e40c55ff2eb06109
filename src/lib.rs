// src/lib.rs
// =============================================================================
// spindel: a minimal web crawler exposed as a stream of page results.
//
// Usage:
//
//   use futures::StreamExt;
//   use spindel::{crawl, CrawlOptions};
//
//   let mut pages = crawl("https://example.com", CrawlOptions::default());
//   while let Some(visit) = pages.next().await {
//       let visit = visit?;
//       println!("{} -> {} link(s)", visit.url(), visit.hrefs().len());
//   }
//
// Modules:
// - crawl: frontier, crawl engine, result records
// - fetch: the HTTP side (Transport trait, reqwest transport, options)
// - html: content-type check, transform hooks, link extraction
// =============================================================================

pub mod crawl;
pub mod fetch;
pub mod html;

pub use crawl::{
    crawl, crawl_with_transport, Crawl, CrawlError, CrawlOptions, CrawlResult, ErrorResult,
    Frontier, Seeds, StackFrontier, Visit,
};
pub use fetch::{HttpResponse, ReqwestTransport, Transport, TransportError, TransportOptions};
pub use html::{extract_links, is_html, is_html_content_type, transform, TransformHtml};
