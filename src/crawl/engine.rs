// src/crawl/engine.rs
// =============================================================================
// The crawl step engine.
//
// A crawl is a Stream: each time the consumer asks for the next item, the
// engine performs exactly one step:
// 1. Ask the frontier for the next URL (nothing left -> stream ends)
// 2. Fetch it
// 3. If the response is HTML, run the transform hook on the body
// 4. Extract links from the (transformed) HTML
// 5. Push each link back to the frontier, in order, one at a time
// 6. Yield the result for this URL
//
// Nothing runs ahead of the consumer: no prefetching, one request in flight.
// Dropping the stream stops the crawl.
//
// Failures:
// - No response from the server: yields an ErrorResult, crawl continues
// - Non-2xx response: yields a normal CrawlResult with no links
// - Frontier/transform failures, invalid URLs: the stream yields the error
//   and then ends
// =============================================================================

use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};
use serde_json::Value;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use super::error::CrawlError;
use super::queue::{Frontier, Seeds};
use super::result::{CrawlResult, ErrorResult, Visit};
use crate::fetch::{ReqwestTransport, Transport, TransportOptions};
use crate::html::{extract_links, is_html, TransformHtml};

// Everything that configures one crawl
//
// Not modified once the crawl has started.
#[derive(Clone, Default)]
pub struct CrawlOptions {
    /// Handed to the default transport untouched
    pub transport: TransportOptions,
    /// Rewrites HTML before link discovery; None keeps the body as-is
    pub transform_html: Option<Arc<dyn TransformHtml>>,
}

// Starts a crawl with the default reqwest transport
//
// Example:
//   let mut crawl = spindel::crawl("https://example.com", CrawlOptions::default());
//   while let Some(visit) = crawl.next().await { ... }
pub fn crawl(seeds: impl Into<Seeds>, options: CrawlOptions) -> Crawl {
    let seeds = seeds.into();
    match ReqwestTransport::new(&options.transport) {
        Ok(transport) => Crawl::new(seeds, Arc::new(transport), options.transform_html),
        Err(e) => Crawl::failed(CrawlError::Unexpected(e)),
    }
}

// Starts a crawl with a caller-provided transport
//
// `options.transport` is ignored: the transport is already configured.
pub fn crawl_with_transport<T>(seeds: impl Into<Seeds>, transport: T, options: CrawlOptions) -> Crawl
where
    T: Transport + 'static,
{
    Crawl::new(seeds.into(), Arc::new(transport), options.transform_html)
}

// The lazy sequence of visits
//
// Not restartable: once it returns None (or an error), it's done.
pub struct Crawl {
    inner: BoxStream<'static, Result<Visit, CrawlError>>,
}

impl Crawl {
    fn new(
        seeds: Seeds,
        transport: Arc<dyn Transport>,
        transform_html: Option<Arc<dyn TransformHtml>>,
    ) -> Self {
        let frontier = match seeds.into_frontier() {
            Ok(frontier) => frontier,
            Err(e) => return Self::failed(e),
        };

        let state = EngineState {
            frontier,
            transport,
            transform_html,
            last_visited: None,
        };

        Self {
            inner: stream::try_unfold(state, step).boxed(),
        }
    }

    // A crawl that fails on its first pull
    fn failed(error: CrawlError) -> Self {
        Self {
            inner: stream::once(async move { Err(error) }).boxed(),
        }
    }

    // Drains the whole crawl, stopping at the first terminal error
    pub async fn into_results(self) -> Result<Vec<Visit>, CrawlError> {
        self.try_collect().await
    }
}

impl Stream for Crawl {
    type Item = Result<Visit, CrawlError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

struct EngineState {
    frontier: Box<dyn Frontier>,
    transport: Arc<dyn Transport>,
    transform_html: Option<Arc<dyn TransformHtml>>,
    last_visited: Option<String>,
}

// One pull: pop, visit, hand back the state for the next pull
async fn step(mut state: EngineState) -> Result<Option<(Visit, EngineState)>, CrawlError> {
    let popped = state
        .frontier
        .pop_url(state.last_visited.as_deref())
        .await?;

    let url = match popped {
        None => return Ok(None),
        Some(entry) if is_empty_entry(&entry) => return Ok(None),
        Some(Value::String(url)) => url,
        Some(other) => return Err(CrawlError::InvalidUrl(other)),
    };

    log::debug!("Visiting {}", url);
    state.last_visited = Some(url.clone());

    let visit = state.visit(&url).await?;
    Ok(Some((visit, state)))
}

// null, false, 0 and "" all mean "nothing left"
fn is_empty_entry(entry: &Value) -> bool {
    match entry {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

impl EngineState {
    async fn visit(&mut self, url: &str) -> Result<Visit, CrawlError> {
        let response = match self.transport.fetch(url).await {
            Ok(response) => response,
            Err(mut err) => {
                if let Some(response) = err.response.take() {
                    log::debug!("{} answered {}", url, response.status_code);
                    return Ok(Visit::Page(CrawlResult::without_links(url, response)));
                }
                log::warn!("Failed to fetch {}: {}", url, err);
                return Ok(Visit::Error(ErrorResult::from_transport_error(url, err)));
            }
        };

        // Transports that hand back error statuses as Ok get the same treatment
        if !response.is_success() {
            log::debug!("{} answered {}", url, response.status_code);
            return Ok(Visit::Page(CrawlResult::without_links(url, response)));
        }

        let transformed_html = if is_html(&response.headers) {
            match &self.transform_html {
                Some(hook) => hook.transform(&response.body, url, &response).await?,
                None => Some(response.body.clone()),
            }
        } else {
            None
        };
        let transformed_html = transformed_html.filter(|html| !html.is_empty());

        let hrefs = transformed_html
            .as_deref()
            .map(extract_links)
            .unwrap_or_default();

        // One push at a time, in document order
        for href in &hrefs {
            self.frontier.push_url(href, url).await?;
        }
        log::debug!("{}: {} link(s) enqueued", url, hrefs.len());

        Ok(Visit::Page(CrawlResult::new(
            url,
            response,
            hrefs,
            transformed_html,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{HttpResponse, TransportError};
    use crate::html::transform;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Mutex;

    // Scripted transport: a fixed answer per URL, records every fetch
    #[derive(Default)]
    struct MockTransport {
        routes: HashMap<String, Result<HttpResponse, TransportError>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockTransport {
        fn page(mut self, url: &str, status_code: u16, content_type: Option<&str>, body: &str) -> Self {
            let mut headers = BTreeMap::new();
            if let Some(content_type) = content_type {
                headers.insert("content-type".to_string(), content_type.to_string());
            }
            let response = HttpResponse {
                url: url.to_string(),
                status_code,
                status_message: status_message(status_code).to_string(),
                body: body.to_string(),
                headers,
            };
            // Mirror ReqwestTransport: error statuses come back as Err
            let answer = if response.is_success() {
                Ok(response)
            } else {
                Err(TransportError::http_status(response))
            };
            self.routes.insert(url.to_string(), answer);
            self
        }

        fn html(self, url: &str, body: &str) -> Self {
            self.page(url, 200, Some("text/html; charset=utf-8"), body)
        }

        fn failure(mut self, url: &str, code: &str, message: &str) -> Self {
            self.routes
                .insert(url.to_string(), Err(TransportError::new(code, message)));
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn status_message(status_code: u16) -> &'static str {
        match status_code {
            200 => "OK",
            404 => "Not Found",
            500 => "Internal Server Error",
            _ => "",
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn fetch(&self, url: &str) -> Result<HttpResponse, TransportError> {
            self.calls.lock().unwrap().push(url.to_string());
            match self.routes.get(url) {
                Some(answer) => answer.clone(),
                None => Err(TransportError::new("ENOTFOUND", format!("no route for {}", url))),
            }
        }
    }

    // Frontier driven by a closure, records pushes
    struct ScriptedFrontier<P> {
        pop: P,
        pushed: Arc<Mutex<Vec<(String, String)>>>,
    }

    fn scripted<P>(pop: P) -> ScriptedFrontier<P>
    where
        P: FnMut(Option<&str>) -> anyhow::Result<Option<Value>> + Send,
    {
        ScriptedFrontier {
            pop,
            pushed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[async_trait]
    impl<P> Frontier for ScriptedFrontier<P>
    where
        P: FnMut(Option<&str>) -> anyhow::Result<Option<Value>> + Send,
    {
        async fn pop_url(&mut self, last_visited: Option<&str>) -> anyhow::Result<Option<Value>> {
            (self.pop)(last_visited)
        }

        async fn push_url(&mut self, url: &str, referrer: &str) -> anyhow::Result<()> {
            self.pushed
                .lock()
                .unwrap()
                .push((url.to_string(), referrer.to_string()));
            Ok(())
        }
    }

    // Hands out its URLs but refuses every push
    struct FullFrontier {
        urls: Vec<Value>,
    }

    #[async_trait]
    impl Frontier for FullFrontier {
        async fn pop_url(&mut self, _last_visited: Option<&str>) -> anyhow::Result<Option<Value>> {
            Ok(self.urls.pop())
        }

        async fn push_url(&mut self, url: &str, _referrer: &str) -> anyhow::Result<()> {
            Err(anyhow!("no room for {}", url))
        }
    }

    const NO_LINKS: &str = "<html><body>Hello world!</body></html>";

    fn run(seeds: impl Into<Seeds>, transport: &Arc<MockTransport>) -> Crawl {
        crawl_with_transport(seeds, Arc::clone(transport), CrawlOptions::default())
    }

    #[tokio::test]
    async fn test_html_response_without_links() {
        let transport = Arc::new(MockTransport::default().html("http://a.domain.com", NO_LINKS));

        let results = run("http://a.domain.com", &transport).into_results().await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status_code(), Some(200));
        assert!(results[0].hrefs().is_empty());
        assert_eq!(results[0].transformed_html(), Some(NO_LINKS));
    }

    #[tokio::test]
    async fn test_html_response_with_links() {
        let transport = Arc::new(
            MockTransport::default()
                .html("http://x.com", r#"<a href="http://a.domain.com">Hello world!</a>"#)
                .html("http://a.domain.com", NO_LINKS),
        );

        let results = run("http://x.com", &transport).into_results().await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url(), "http://x.com");
        assert_eq!(results[0].hrefs(), ["http://a.domain.com".to_string()]);
        assert_eq!(results[1].url(), "http://a.domain.com");
        assert!(results[1].hrefs().is_empty());
    }

    #[tokio::test]
    async fn test_relative_links_are_pushed_as_is() {
        let transport = Arc::new(
            MockTransport::default()
                .html("http://yetanother.domain.com", r#"<a href="/hello">Hello</a>"#)
                .html("/hello", NO_LINKS),
        );

        let results = run("http://yetanother.domain.com", &transport)
            .into_results()
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].hrefs(), ["/hello".to_string()]);
        assert_eq!(results[1].url(), "/hello");
    }

    #[tokio::test]
    async fn test_links_pushed_in_document_order_and_popped_lifo() {
        let transport = Arc::new(
            MockTransport::default()
                .html(
                    "http://x.com",
                    r#"<a href="http://x.com/1">1</a><a href="http://x.com/2">2</a>"#,
                )
                .html("http://x.com/1", NO_LINKS)
                .html("http://x.com/2", NO_LINKS),
        );

        let results = run("http://x.com", &transport).into_results().await.unwrap();
        let urls: Vec<&str> = results.iter().map(|visit| visit.url()).collect();

        assert_eq!(urls, vec!["http://x.com", "http://x.com/2", "http://x.com/1"]);
        assert_eq!(
            results[0].hrefs(),
            ["http://x.com/1".to_string(), "http://x.com/2".to_string()]
        );
    }

    #[tokio::test]
    async fn test_non_html_response() {
        let transport = Arc::new(MockTransport::default().page(
            "http://another.domain.com",
            200,
            Some("text/plain"),
            r#"# Hello world <a href="http://hidden.com">not a link here</a>"#,
        ));

        let results = run("http://another.domain.com", &transport)
            .into_results()
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status_code(), Some(200));
        assert!(results[0].hrefs().is_empty());
        assert!(results[0].transformed_html().is_none());
        assert_eq!(transport.calls(), vec!["http://another.domain.com"]);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_not_html() {
        let transport = Arc::new(MockTransport::default().page(
            "http://x.com",
            200,
            None,
            r#"<a href="http://a.domain.com">link</a>"#,
        ));

        let results = run("http://x.com", &transport).into_results().await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(results[0].hrefs().is_empty());
    }

    #[tokio::test]
    async fn test_http_error_response() {
        let transport = Arc::new(MockTransport::default().page(
            "http://errors.com",
            500,
            Some("text/html"),
            r#"Internal Server Error <a href="http://a.domain.com">home</a>"#,
        ));

        let results = run("http://errors.com", &transport).into_results().await.unwrap();

        assert_eq!(results.len(), 1);
        let page = results[0].as_page().unwrap();
        assert_eq!(page.status_code, 500);
        assert_eq!(page.status_message, "Internal Server Error");
        assert!(page.body.contains("Internal Server Error"));
        assert!(page.hrefs.is_empty());
        assert!(page.transformed_html.is_none());
    }

    #[tokio::test]
    async fn test_error_status_returned_as_ok() {
        struct PlainTransport;

        #[async_trait]
        impl Transport for PlainTransport {
            async fn fetch(&self, url: &str) -> Result<HttpResponse, TransportError> {
                let mut headers = BTreeMap::new();
                headers.insert("content-type".to_string(), "text/html".to_string());
                Ok(HttpResponse {
                    url: url.to_string(),
                    status_code: 404,
                    status_message: "Not Found".to_string(),
                    body: r#"<a href="http://a.domain.com">home</a>"#.to_string(),
                    headers,
                })
            }
        }

        let results = crawl_with_transport("http://x.com", PlainTransport, CrawlOptions::default())
            .into_results()
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status_code(), Some(404));
        assert!(results[0].hrefs().is_empty());
    }

    #[tokio::test]
    async fn test_request_error_response() {
        let transport = Arc::new(MockTransport::default().failure(
            "http://more.errors.com/",
            "ECONNREFUSED",
            "127.0.0.1",
        ));

        let results = run("http://more.errors.com/", &transport)
            .into_results()
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        let error = results[0].as_error().unwrap();
        assert_eq!(error.code.as_deref(), Some("ECONNREFUSED"));
        assert_eq!(error.message, "127.0.0.1");
        assert_eq!(error.status_code, None);
        assert!(error.hrefs.is_empty());
    }

    #[tokio::test]
    async fn test_request_error_does_not_stop_crawl() {
        let transport = Arc::new(
            MockTransport::default()
                .html("http://a.domain.com", NO_LINKS)
                .failure("http://down.com", "ECONNREFUSED", "refused"),
        );

        let results = run(vec!["http://a.domain.com", "http://down.com"], &transport)
            .into_results()
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_error());
        assert!(results[1].is_ok());
    }

    const WITH_ASIDE: &str = r#"
        <html>
            <body>
                <main>
                    <a href="http://a.domain.com">Hello world!</a>
                </main>
                <aside>
                    <a href="http://not-important.com">Not important</a>
                </aside>
            </body>
        </html>
    "#;

    fn aside_transport() -> Arc<MockTransport> {
        Arc::new(
            MockTransport::default()
                .html("http://another.domain.com", WITH_ASIDE)
                .html("http://a.domain.com", NO_LINKS)
                .page("http://not-important.com", 404, None, ""),
        )
    }

    #[tokio::test]
    async fn test_transform_html_sync() {
        let transport = aside_transport();
        let options = CrawlOptions {
            transform_html: Some(transform::select("main").unwrap()),
            ..Default::default()
        };

        let results = crawl_with_transport("http://another.domain.com", Arc::clone(&transport), options)
            .into_results()
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status_code(), Some(200));
        assert_eq!(results[0].hrefs(), ["http://a.domain.com".to_string()]);
        assert!(!results[0].transformed_html().unwrap().contains("aside"));
        assert!(!transport.calls().contains(&"http://not-important.com".to_string()));
    }

    #[tokio::test]
    async fn test_transform_html_deferred() {
        let transport = aside_transport();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let hook_seen = Arc::clone(&seen);
        let options = CrawlOptions {
            transform_html: Some(transform::from_async(move |body, url, res| {
                let seen = Arc::clone(&hook_seen);
                async move {
                    seen.lock().unwrap().push((url, res.status_code));
                    tokio::task::yield_now().await;
                    let end = body.find("<aside>").unwrap_or(body.len());
                    Ok(Some(body[..end].to_string()))
                }
            })),
            ..Default::default()
        };

        let results = crawl_with_transport("http://another.domain.com", Arc::clone(&transport), options)
            .into_results()
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].hrefs(), ["http://a.domain.com".to_string()]);
        assert!(!transport.calls().contains(&"http://not-important.com".to_string()));
        // Every HTML page goes through the hook, in crawl order
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("http://another.domain.com".to_string(), 200),
                ("http://a.domain.com".to_string(), 200),
            ]
        );
    }

    #[tokio::test]
    async fn test_transform_without_content_finds_no_links() {
        let transport = aside_transport();
        let options = CrawlOptions {
            transform_html: Some(transform::from_fn(|_body, _url, _res| Ok(None))),
            ..Default::default()
        };

        let results = crawl_with_transport("http://another.domain.com", Arc::clone(&transport), options)
            .into_results()
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!(results[0].hrefs().is_empty());
        assert!(results[0].transformed_html().is_none());
    }

    #[tokio::test]
    async fn test_transform_failure_ends_crawl() {
        let transport = aside_transport();
        let options = CrawlOptions {
            transform_html: Some(transform::from_fn(|_body, _url, _res| Err(anyhow!("bad markup")))),
            ..Default::default()
        };

        let err = crawl_with_transport("http://another.domain.com", Arc::clone(&transport), options)
            .into_results()
            .await
            .unwrap_err();

        assert!(matches!(err, CrawlError::Unexpected(_)));
        assert_eq!(err.to_string(), "bad markup");
    }

    #[tokio::test]
    async fn test_custom_frontier_without_pushes() {
        let transport = Arc::new(MockTransport::default().html(
            "http://example.com",
            r#"<a href="http://another.domain.com">Link</a>"#,
        ));
        let mut urls = vec![json!("http://example.com")];
        let frontier = scripted(move |_last| Ok(urls.pop()));
        let pushed = Arc::clone(&frontier.pushed);

        let results = run(Seeds::frontier(frontier), &transport)
            .into_results()
            .await
            .unwrap();

        assert_eq!(transport.calls(), vec!["http://example.com"]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url(), "http://example.com");
        assert_eq!(results[0].hrefs(), ["http://another.domain.com".to_string()]);
        assert_eq!(
            *pushed.lock().unwrap(),
            vec![("http://another.domain.com".to_string(), "http://example.com".to_string())]
        );
    }

    #[tokio::test]
    async fn test_custom_frontier_uses_last_visited() {
        let transport = Arc::new(
            MockTransport::default()
                .html("http://examples.com", NO_LINKS)
                .html("http://more.examples.com", NO_LINKS),
        );
        let frontier = scripted(|last| {
            Ok(match last {
                None => Some(json!("http://examples.com")),
                Some("http://examples.com") => Some(json!("http://more.examples.com")),
                Some(_) => None,
            })
        });

        let results = run(Seeds::frontier(frontier), &transport)
            .into_results()
            .await
            .unwrap();

        assert_eq!(transport.calls(), vec!["http://examples.com", "http://more.examples.com"]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url(), "http://examples.com");
        assert_eq!(results[1].url(), "http://more.examples.com");
    }

    #[tokio::test]
    async fn test_failing_push_ends_crawl() {
        let transport = Arc::new(
            MockTransport::default()
                .html("http://example.com", r#"<a href="http://b.com">B</a>"#)
                .html("http://other.com", NO_LINKS),
        );
        let frontier = FullFrontier {
            urls: vec![json!("http://other.com"), json!("http://example.com")],
        };

        let mut crawl = run(Seeds::frontier(frontier), &transport);

        let err = crawl.next().await.unwrap().unwrap_err();
        assert!(matches!(err, CrawlError::Unexpected(_)));
        assert_eq!(err.to_string(), "no room for http://b.com");
        assert!(crawl.next().await.is_none());
        assert_eq!(transport.calls(), vec!["http://example.com"]);
    }

    #[tokio::test]
    async fn test_empty_hrefs_are_not_counted_or_pushed() {
        // Two anchors, one link: an empty href would pop as "nothing left"
        let transport = Arc::new(
            MockTransport::default()
                .html(
                    "http://example.com",
                    r#"<a href="">Self</a><a href="http://b.com">B</a>"#,
                )
                .html("http://b.com", NO_LINKS),
        );

        let results = run("http://example.com", &transport).into_results().await.unwrap();

        assert_eq!(results[0].hrefs(), ["http://b.com".to_string()]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].url(), "http://b.com");
        assert_eq!(transport.calls(), vec!["http://example.com", "http://b.com"]);
    }

    #[tokio::test]
    async fn test_non_string_in_initial_urls() {
        let transport = Arc::new(MockTransport::default());

        let err = run(json!([{"bad": true}]), &transport)
            .into_results()
            .await
            .unwrap_err();

        assert!(matches!(err, CrawlError::InvalidUrl(_)));
        assert!(err.to_string().starts_with("A url must be a string!"));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_string_in_custom_frontier() {
        let transport = Arc::new(MockTransport::default());
        let mut urls = vec![json!(42)];
        let frontier = scripted(move |_last| Ok(urls.pop()));

        let err = run(Seeds::frontier(frontier), &transport)
            .into_results()
            .await
            .unwrap_err();

        assert!(matches!(err, CrawlError::InvalidUrl(_)));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_incomplete_frontier() {
        let transport = Arc::new(MockTransport::default().html("http://example.com", NO_LINKS));

        let err = run(json!({"urls": ["http://example.com"], "shiftUrl": true}), &transport)
            .into_results()
            .await
            .unwrap_err();

        assert!(matches!(err, CrawlError::MissingQueueCapability(_)));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failing_frontier() {
        let transport = Arc::new(MockTransport::default().html("http://example.com", NO_LINKS));
        let frontier = scripted(|_last| Err(anyhow!("Ooops!")));

        let mut crawl = run(Seeds::frontier(frontier), &transport);

        let err = crawl.next().await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Ooops!");
        assert!(crawl.next().await.is_none());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_falsy_entries_end_the_crawl() {
        let transport = Arc::new(MockTransport::default().html("http://a.domain.com", NO_LINKS));

        for seeds in [json!([null]), json!([""]), json!([false]), json!([0]), json!(null)] {
            let results = run(seeds, &transport).into_results().await.unwrap();
            assert!(results.is_empty());
        }
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_consumer_controls_the_pace() {
        let transport = Arc::new(
            MockTransport::default()
                .html("http://x.com/1", NO_LINKS)
                .html("http://x.com/2", NO_LINKS)
                .html("http://x.com/3", NO_LINKS),
        );

        let mut crawl = run(vec!["http://x.com/1", "http://x.com/2", "http://x.com/3"], &transport);
        assert!(transport.calls().is_empty());

        let first = crawl.next().await.unwrap().unwrap();
        assert_eq!(first.url(), "http://x.com/3");
        assert_eq!(transport.calls(), vec!["http://x.com/3"]);

        drop(crawl);
        assert_eq!(transport.calls().len(), 1);
    }

    #[test]
    fn test_empty_entries() {
        assert!(is_empty_entry(&json!(null)));
        assert!(is_empty_entry(&json!("")));
        assert!(is_empty_entry(&json!(false)));
        assert!(is_empty_entry(&json!(0)));
        assert!(is_empty_entry(&json!(0.0)));
        assert!(!is_empty_entry(&json!("http://a.com")));
        assert!(!is_empty_entry(&json!(true)));
        assert!(!is_empty_entry(&json!(1)));
        assert!(!is_empty_entry(&json!([])));
        assert!(!is_empty_entry(&json!({})));
    }
}
