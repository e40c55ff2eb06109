// src/fetch/options.rs
// =============================================================================
// Transport configuration.
//
// The crawl engine never looks at these values; they are handed straight to
// the HTTP transport. They can come from code, from a JSON file (serde) or
// from CLI flags.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportOptions {
    /// Whole-request timeout in seconds, `None` to wait forever
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: Option<u64>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Redirects to follow before giving up with EMAXREDIRECTS
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Extra attempts after a connection-level failure (never for HTTP statuses)
    #[serde(default = "default_retries")]
    pub retries: usize,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    #[serde(default = "default_gzip")]
    pub gzip: bool,

    /// Honor HTTP_PROXY / HTTPS_PROXY / NO_PROXY from the environment
    #[serde(default = "default_system_proxy")]
    pub system_proxy: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
            retries: default_retries(),
            headers: BTreeMap::new(),
            gzip: default_gzip(),
            system_proxy: default_system_proxy(),
        }
    }
}

fn default_timeout_secs() -> Option<u64> {
    Some(10)
}

fn default_user_agent() -> String {
    format!("spindel/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_redirects() -> usize {
    10
}

fn default_retries() -> usize {
    2
}

fn default_gzip() -> bool {
    true
}

fn default_system_proxy() -> bool {
    true
}
