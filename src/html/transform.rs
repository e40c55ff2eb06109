// src/html/transform.rs
// =============================================================================
// The transform hook: a caller-supplied step that rewrites an HTML body
// before links are discovered in it.
//
// Typical uses:
// - Keep only the main content of a page so navigation links are ignored
// - Rewrite relative hrefs into absolute ones
// - Strip markup the caller doesn't care about
//
// Returning None (or an empty string) means "nothing left": the page is
// still emitted, but no links are extracted from it.
//
// The hook may be plain synchronous code or async; both are wrapped into the
// same async trait so the crawl engine only has one way to call it.
// =============================================================================

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::future::Future;
use std::sync::Arc;

use crate::fetch::HttpResponse;

#[async_trait]
pub trait TransformHtml: Send + Sync {
    async fn transform(
        &self,
        body: &str,
        url: &str,
        response: &HttpResponse,
    ) -> Result<Option<String>>;
}

// Wraps a synchronous closure
//
// Example:
//   let hook = transform::from_fn(|body, _url, _res| Ok(Some(body.to_uppercase())));
pub fn from_fn<F>(f: F) -> Arc<dyn TransformHtml>
where
    F: Fn(&str, &str, &HttpResponse) -> Result<Option<String>> + Send + Sync + 'static,
{
    Arc::new(SyncTransform(f))
}

// Wraps a closure returning a future
//
// The closure gets owned copies of its inputs so the future can outlive
// the borrowed response.
pub fn from_async<F, Fut>(f: F) -> Arc<dyn TransformHtml>
where
    F: Fn(String, String, HttpResponse) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<String>>> + Send + 'static,
{
    Arc::new(DeferredTransform(f))
}

// Keeps the inner HTML of the first element matching `css`
//
// Falls back to the whole body when nothing matches, so pages without
// the expected layout are still crawled.
pub fn select(css: &str) -> Result<Arc<dyn TransformHtml>> {
    let selector =
        Selector::parse(css).map_err(|e| anyhow!("Invalid CSS selector '{}': {:?}", css, e))?;
    Ok(Arc::new(SelectTransform { selector }))
}

struct SyncTransform<F>(F);

#[async_trait]
impl<F> TransformHtml for SyncTransform<F>
where
    F: Fn(&str, &str, &HttpResponse) -> Result<Option<String>> + Send + Sync,
{
    async fn transform(
        &self,
        body: &str,
        url: &str,
        response: &HttpResponse,
    ) -> Result<Option<String>> {
        (self.0)(body, url, response)
    }
}

struct DeferredTransform<F>(F);

#[async_trait]
impl<F, Fut> TransformHtml for DeferredTransform<F>
where
    F: Fn(String, String, HttpResponse) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<String>>> + Send + 'static,
{
    async fn transform(
        &self,
        body: &str,
        url: &str,
        response: &HttpResponse,
    ) -> Result<Option<String>> {
        (self.0)(body.to_string(), url.to_string(), response.clone()).await
    }
}

struct SelectTransform {
    selector: Selector,
}

impl SelectTransform {
    fn apply(&self, body: &str) -> String {
        let document = Html::parse_document(body);
        match document.select(&self.selector).next() {
            Some(element) => element.inner_html(),
            None => body.to_string(),
        }
    }
}

#[async_trait]
impl TransformHtml for SelectTransform {
    async fn transform(
        &self,
        body: &str,
        _url: &str,
        _response: &HttpResponse,
    ) -> Result<Option<String>> {
        Ok(Some(self.apply(body)))
    }
}
