// src/crawl/mod.rs
// =============================================================================
// This module handles the crawl itself.
//
// Features:
// - A pluggable frontier deciding which URL comes next
// - A pull-based stream: one fetch per item the consumer asks for
// - Connection failures reported as items, not as the end of the crawl
//
// Submodules:
// - queue: the Frontier trait, the default StackFrontier, crawl seeds
// - engine: the stream that runs one crawl step per pull
// - result: the records the stream produces
// - error: the failures that stop a crawl
// =============================================================================

mod engine;
mod error;
mod queue;
mod result;

pub use engine::{crawl, crawl_with_transport, Crawl, CrawlOptions};
pub use error::CrawlError;
pub use queue::{Frontier, Seeds, StackFrontier};
pub use result::{CrawlResult, ErrorResult, Visit};
