// src/crawl/queue.rs
// =============================================================================
// This module holds the crawl frontier: the URLs waiting to be visited.
//
// How it works:
// 1. The engine asks the frontier for the next URL (pop_url), telling it
//    which URL it visited last
// 2. After a page is fetched, every discovered link is handed back to the
//    frontier (push_url), one at a time, in the order they were found
// 3. When pop_url returns nothing, the crawl is over
//
// The frontier decides crawl order, deduplication, limits... The engine
// does none of that. The built-in StackFrontier is the simplest possible
// one: last in, first out, no memory of what was already visited.
//
// Rust concepts:
// - Traits: Frontier is an interface that callers can implement
// - async-trait: lets a frontier await a database or a remote queue
// - serde_json::Value: raw entries, for frontiers fed from JSON storage
// =============================================================================

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use super::error::CrawlError;

#[async_trait]
pub trait Frontier: Send {
    // Returns the next URL to visit, or None/an empty value when exhausted
    //
    // `last_visited` is None on the first call. Entries are raw JSON values;
    // anything other than a string (or an empty value) stops the crawl
    // with CrawlError::InvalidUrl.
    async fn pop_url(&mut self, last_visited: Option<&str>) -> Result<Option<Value>>;

    // Called once per discovered link with the page it was found on
    async fn push_url(&mut self, url: &str, referrer: &str) -> Result<()>;
}

#[async_trait]
impl<F: Frontier + ?Sized> Frontier for Box<F> {
    async fn pop_url(&mut self, last_visited: Option<&str>) -> Result<Option<Value>> {
        (**self).pop_url(last_visited).await
    }

    async fn push_url(&mut self, url: &str, referrer: &str) -> Result<()> {
        (**self).push_url(url, referrer).await
    }
}

// In-memory last-in-first-out frontier
//
// Example:
//   seeded with [A, B]: pops B, then A
//   after pushing X then Y: pops Y first
#[derive(Debug, Clone, Default)]
pub struct StackFrontier {
    urls: Vec<Value>,
}

impl StackFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    // Seeds the stack with raw values, e.g. a JSON array read from a file
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            urls: values.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StackFrontier {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_values(iter.into_iter().map(|url| Value::String(url.into())))
    }
}

#[async_trait]
impl Frontier for StackFrontier {
    async fn pop_url(&mut self, _last_visited: Option<&str>) -> Result<Option<Value>> {
        Ok(self.urls.pop())
    }

    async fn push_url(&mut self, url: &str, _referrer: &str) -> Result<()> {
        self.urls.push(Value::String(url.to_string()));
        Ok(())
    }
}

// Where a crawl starts: one URL, a list of URLs, or a whole frontier
//
// Plain URLs are wrapped into a StackFrontier. JSON input follows the same
// rules: a string or any other scalar becomes a one-entry stack, an array
// becomes a stack of its elements, null becomes an empty stack. A JSON
// object can't provide pop_url/push_url, so it is kept as Unusable and the
// crawl fails on its first pull, before anything is fetched.
pub enum Seeds {
    Frontier(Box<dyn Frontier>),
    Unusable(String),
}

impl Seeds {
    pub fn frontier(frontier: impl Frontier + 'static) -> Self {
        Seeds::Frontier(Box::new(frontier))
    }

    pub(crate) fn into_frontier(self) -> Result<Box<dyn Frontier>, CrawlError> {
        match self {
            Seeds::Frontier(frontier) => Ok(frontier),
            Seeds::Unusable(description) => Err(CrawlError::MissingQueueCapability(description)),
        }
    }
}

impl From<&str> for Seeds {
    fn from(url: &str) -> Self {
        Seeds::frontier(std::iter::once(url).collect::<StackFrontier>())
    }
}

impl From<String> for Seeds {
    fn from(url: String) -> Self {
        Seeds::frontier(std::iter::once(url).collect::<StackFrontier>())
    }
}

impl From<Vec<String>> for Seeds {
    fn from(urls: Vec<String>) -> Self {
        Seeds::frontier(urls.into_iter().collect::<StackFrontier>())
    }
}

impl From<Vec<&str>> for Seeds {
    fn from(urls: Vec<&str>) -> Self {
        Seeds::frontier(urls.into_iter().collect::<StackFrontier>())
    }
}

impl From<StackFrontier> for Seeds {
    fn from(frontier: StackFrontier) -> Self {
        Seeds::frontier(frontier)
    }
}

impl From<Box<dyn Frontier>> for Seeds {
    fn from(frontier: Box<dyn Frontier>) -> Self {
        Seeds::Frontier(frontier)
    }
}

impl From<Value> for Seeds {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(values) => Seeds::frontier(StackFrontier::from_values(values)),
            Value::Null => Seeds::frontier(StackFrontier::new()),
            Value::Object(map) => {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                Seeds::Unusable(format!("a JSON object with keys {:?}", keys))
            }
            scalar => Seeds::frontier(StackFrontier::from_values([scalar])),
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is pop_url async if StackFrontier never waits on anything?
//    - Other frontiers might: a Redis list, a database table, a remote API
//    - One async signature means the engine doesn't care which kind it has
//    - An async fn that never awaits is just a regular function in disguise
//
// 2. What is Box<dyn Frontier>?
//    - A pointer to "some type implementing Frontier", decided at runtime
//    - Lets Seeds hold a StackFrontier or a caller's own frontier alike
//
// 3. Why a stack and not a queue (VecDeque)?
//    - Vec::push / Vec::pop is the simplest LIFO there is
//    - The crawl ends up depth-first: the newest link is visited next
//    - Want breadth-first? Implement Frontier over a VecDeque
// -----------------------------------------------------------------------------
