// src/fetch/http.rs
// =============================================================================
// This module performs the HTTP GET for each crawled URL.
//
// Key functionality:
// - Transport trait: the seam between the crawl engine and the network,
//   so tests (or callers) can plug in their own fetcher
// - ReqwestTransport: the default implementation on top of reqwest
// - Detects various failure modes (timeout, DNS, refused connection, SSL...)
//   and turns them into short error codes like "ECONNREFUSED"
//
// Two kinds of failure come out of a fetch:
// - The server answered with a non-2xx status: the error carries the full
//   response, the crawl treats it as a normal (link-less) result
// - No answer at all: the error carries only a code and a message
//
// Rust concepts:
// - Traits + async-trait: async methods behind a trait object
// - thiserror: deriving std::error::Error for our error struct
// - loop/match: retrying a request a bounded number of times
// =============================================================================

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::options::TransportOptions;

// A complete HTTP response, body already read
//
// Header names are lowercase. A header sent several times is joined
// with ", " into a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    /// Final URL after redirects
    pub url: String,
    pub status_code: u16,
    pub status_message: String,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

// A fetch that did not produce a 2xx response
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Short machine-readable code, e.g. "ECONNREFUSED" or "HTTPError"
    pub code: Option<String>,
    pub message: String,
    pub status_code: Option<u16>,
    pub status_message: Option<String>,
    /// Present when the server did answer (non-2xx status)
    pub response: Option<HttpResponse>,
}

impl TransportError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            status_code: None,
            status_message: None,
            response: None,
        }
    }

    // Wraps a non-2xx response
    pub fn http_status(response: HttpResponse) -> Self {
        Self {
            code: Some("HTTPError".to_string()),
            message: format!(
                "Response code {} ({})",
                response.status_code, response.status_message
            ),
            status_code: Some(response.status_code),
            status_message: Some(response.status_message.clone()),
            response: Some(response),
        }
    }

    fn is_retryable(&self) -> bool {
        self.response.is_none()
            && self.status_code.is_none()
            && !matches!(
                self.code.as_deref(),
                Some("EINVALIDURL") | Some("EMAXREDIRECTS") | Some("ECERT")
            )
    }
}

// Anything able to GET a URL
//
// Implementations may be entirely synchronous inside; the async signature
// just gives the crawl engine one way to wait on them.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

// Lets one transport be shared between crawls (or kept around by a test)
#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn fetch(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).fetch(url).await
    }
}

// The default transport, configured once from TransportOptions
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    retries: usize,
}

impl ReqwestTransport {
    pub fn new(options: &TransportOptions) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .with_context(|| format!("Invalid header name '{}'", name))?;
            let header_value = HeaderValue::from_str(value)
                .with_context(|| format!("Invalid value for header '{}'", name))?;
            headers.insert(header_name, header_value);
        }

        let mut builder = Client::builder()
            .user_agent(options.user_agent.clone())
            .redirect(Policy::limited(options.max_redirects))
            .default_headers(headers)
            .gzip(options.gzip);

        if let Some(secs) = options.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !options.system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            retries: options.retries,
        })
    }

    // One attempt, no retries
    async fn fetch_once(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        let status_message = status.canonical_reason().unwrap_or("").to_string();
        let final_url = response.url().to_string();
        let headers = collect_headers(response.headers());

        // The status line arrived but the body didn't: keep the status,
        // there is still no response to show
        let body = response.text().await.map_err(|e| {
            let mut err = categorize_error(e);
            err.status_code = Some(status.as_u16());
            err.status_message = Some(status_message.clone());
            err
        })?;

        let response = HttpResponse {
            url: final_url,
            status_code: status.as_u16(),
            status_message,
            body,
            headers,
        };

        if response.is_success() {
            Ok(response)
        } else {
            Err(TransportError::http_status(response))
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn fetch(&self, url: &str) -> Result<HttpResponse, TransportError> {
        // Relative hrefs end up here untouched, so this is a normal failure
        let parsed = Url::parse(url).map_err(|e| {
            TransportError::new("EINVALIDURL", format!("Invalid URL '{}': {}", url, e))
        })?;

        let mut attempt = 0;
        loop {
            match self.fetch_once(&parsed).await {
                Err(err) if err.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    log::debug!(
                        "Retrying {} ({}/{}) after: {}",
                        url,
                        attempt,
                        self.retries,
                        err
                    );
                    tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                }
                result => return result,
            }
        }
    }
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();

    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        collected
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    collected
}

// Categorizes different error types from reqwest
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
// - etc.
fn categorize_error(error: reqwest::Error) -> TransportError {
    let message = error_chain(&error);
    let lowercase = message.to_lowercase();

    let code = if error.is_timeout() {
        "ETIMEDOUT"
    } else if error.is_redirect() {
        "EMAXREDIRECTS"
    } else if error.is_builder() {
        "EINVALIDURL"
    } else if lowercase.contains("certificate") || lowercase.contains("ssl") {
        // TLS failures also report is_connect(), so check them first
        "ECERT"
    } else if error.is_connect() {
        if lowercase.contains("dns") {
            "ENOTFOUND"
        } else {
            "ECONNREFUSED"
        }
    } else if error.is_body() || error.is_decode() {
        "EBODY"
    } else {
        "EREQUEST"
    };

    let mut err = TransportError::new(code, message);
    if let Some(status) = error.status() {
        err.status_code = Some(status.as_u16());
        err.status_message = status.canonical_reason().map(str::to_string);
    }
    err
}

// reqwest keeps the interesting part (e.g. "Connection refused") in the
// source chain
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);

    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }

    message
}
