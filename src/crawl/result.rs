// src/crawl/result.rs
// =============================================================================
// The records a crawl produces, one per visited URL.
//
// - CrawlResult: the server answered (any status code)
// - ErrorResult: no answer at all (refused connection, DNS failure, ...)
//
// Both serialize to the same camelCase JSON shape so consumers can tell them
// apart by the missing statusCode / the present `code` field.
// =============================================================================

use serde::Serialize;
use std::collections::BTreeMap;

use crate::fetch::{HttpResponse, TransportError};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// The URL as popped from the frontier (not the post-redirect one)
    pub url: String,
    pub status_code: u16,
    pub status_message: String,
    pub body: String,
    pub headers: BTreeMap<String, String>,
    /// Links discovered on the page, in document order
    pub hrefs: Vec<String>,
    /// Output of the transform hook, None when the page wasn't HTML
    pub transformed_html: Option<String>,
}

impl CrawlResult {
    pub(crate) fn new(
        url: &str,
        response: HttpResponse,
        hrefs: Vec<String>,
        transformed_html: Option<String>,
    ) -> Self {
        Self {
            url: url.to_string(),
            status_code: response.status_code,
            status_message: response.status_message,
            body: response.body,
            headers: response.headers,
            hrefs,
            transformed_html,
        }
    }

    // Error statuses: the page is reported but never mined for links
    pub(crate) fn without_links(url: &str, response: HttpResponse) -> Self {
        Self::new(url, response, Vec::new(), None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResult {
    pub url: String,
    pub status_code: Option<u16>,
    pub status_message: Option<String>,
    pub body: Option<String>,
    pub headers: Option<BTreeMap<String, String>>,
    /// Always empty
    pub hrefs: Vec<String>,
    /// Always None
    pub transformed_html: Option<String>,
    pub code: Option<String>,
    pub message: String,
}

impl ErrorResult {
    pub fn from_transport_error(url: &str, error: TransportError) -> Self {
        let (body, headers) = match error.response {
            Some(response) => (Some(response.body), Some(response.headers)),
            None => (None, None),
        };

        Self {
            url: url.to_string(),
            status_code: error.status_code,
            status_message: error.status_message,
            body,
            headers,
            hrefs: Vec::new(),
            transformed_html: None,
            code: error.code,
            message: error.message,
        }
    }
}

// One item of the crawl stream
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Visit {
    Page(CrawlResult),
    Error(ErrorResult),
}

impl Visit {
    pub fn url(&self) -> &str {
        match self {
            Visit::Page(page) => &page.url,
            Visit::Error(error) => &error.url,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Visit::Page(page) => Some(page.status_code),
            Visit::Error(error) => error.status_code,
        }
    }

    pub fn hrefs(&self) -> &[String] {
        match self {
            Visit::Page(page) => &page.hrefs,
            Visit::Error(error) => &error.hrefs,
        }
    }

    pub fn transformed_html(&self) -> Option<&str> {
        match self {
            Visit::Page(page) => page.transformed_html.as_deref(),
            Visit::Error(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Visit::Error(_))
    }

    // True for pages that came back 2xx
    pub fn is_ok(&self) -> bool {
        matches!(self, Visit::Page(page) if (200..300).contains(&page.status_code))
    }

    pub fn as_page(&self) -> Option<&CrawlResult> {
        match self {
            Visit::Page(page) => Some(page),
            Visit::Error(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorResult> {
        match self {
            Visit::Page(_) => None,
            Visit::Error(error) => Some(error),
        }
    }
}
