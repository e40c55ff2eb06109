// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The CLI is a thin layer over the library:
// - URLs (or a JSON seeds value) become the crawl's starting frontier
// - Transport flags and an optional JSON config file become TransportOptions
// - --select turns into the built-in `select` transform hook
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct below
// - Option<T>: flags that may or may not be given
// =============================================================================

use anyhow::{bail, Context, Result};
use clap::Parser;
use spindel::{Seeds, TransportOptions};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "spindel",
    version,
    about = "Crawl the web starting from one or more URLs",
    long_about = "spindel fetches each URL, discovers the links on HTML pages, and keeps \
                  going until no links are left (or --limit is reached). \
                  Each visited URL is printed as it is crawled."
)]
pub struct Cli {
    /// URLs to start crawling from
    pub urls: Vec<String>,

    /// Starting point as a JSON value instead of URLS
    ///
    /// Example: --seeds '["https://a.com", "https://b.com"]'
    #[arg(long, value_name = "JSON")]
    pub seeds: Option<String>,

    /// Print every visit as one JSON line instead of a table
    #[arg(long)]
    pub json: bool,

    /// Stop after this many visited URLs
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Only discover links inside the first element matching this CSS selector
    ///
    /// Example: --select main
    #[arg(long, value_name = "CSS")]
    pub select: Option<String>,

    /// JSON file with transport options (timeoutSecs, userAgent, retries, ...)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// User-Agent header to send
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Retries after a connection-level failure
    #[arg(long, value_name = "N")]
    pub retries: Option<usize>,

    /// Redirects to follow per request
    #[arg(long, value_name = "N")]
    pub max_redirects: Option<usize>,

    /// Log every crawl step (same as RUST_LOG=spindel=debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    // Builds the crawl's starting point from URLS or --seeds
    pub fn seeds(&self) -> Result<Seeds> {
        match (&self.seeds, self.urls.is_empty()) {
            (Some(_), false) => bail!("Use either URLS or --seeds, not both"),
            (Some(json), true) => {
                let value: serde_json::Value =
                    serde_json::from_str(json).context("--seeds is not valid JSON")?;
                Ok(Seeds::from(value))
            }
            (None, false) => Ok(Seeds::from(self.urls.clone())),
            (None, true) => bail!("Nothing to crawl: pass at least one URL or --seeds"),
        }
    }

    // Config file first, then individual flags on top
    pub fn transport_options(&self) -> Result<TransportOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Could not read {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Invalid transport options in {}", path.display()))?
            }
            None => TransportOptions::default(),
        };

        if let Some(timeout) = self.timeout {
            options.timeout_secs = Some(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            options.user_agent = user_agent.clone();
        }
        if let Some(retries) = self.retries {
            options.retries = retries;
        }
        if let Some(max_redirects) = self.max_redirects {
            options.max_redirects = max_redirects;
        }

        Ok(options)
    }
}
