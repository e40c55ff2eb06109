// src/crawl/error.rs
// =============================================================================
// Errors that end a crawl.
//
// Only these stop the stream. A host that can't be reached is NOT one of
// them: it becomes an ErrorResult item and the crawl moves on. An HTTP error
// status isn't either: it's a regular CrawlResult with no links.
// =============================================================================

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seeds can't act as a frontier (e.g. a JSON object was given)
    #[error("A queue must implement `push_url` and `pop_url`! (got {0})")]
    MissingQueueCapability(String),

    /// The frontier handed back something that isn't a URL string
    #[error("A url must be a string! (got {0})")]
    InvalidUrl(Value),

    /// Anything else: a failing frontier, transform hook, or transport setup.
    /// Displayed exactly like the underlying error.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
