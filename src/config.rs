//! Client Configuration
//!
//! Endpoint and transport settings for an [`AffinityClient`](crate::AffinityClient).
//! The library never reads files or environment variables; callers build a
//! [`ClientConfig`] in code or deserialize one from their own settings source.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.affinity.co";

/// Page size used by the "list all" streams when the caller sets none
pub const DEFAULT_PAGE_SIZE: u32 = 50;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("affinity-client/{}", env!("CARGO_PKG_VERSION"))
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every operation path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User-Agent header sent with each request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Whole-request timeout in milliseconds; no timeout when unset or zero
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Page size for auto-paginating streams
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: None,
            page_size: default_page_size(),
        }
    }
}

impl ClientConfig {
    /// Point the client at another endpoint (test doubles, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Rounded up to whole milliseconds
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_nanos().div_ceil(1_000_000);
        self.timeout_ms = Some(u64::try_from(millis).unwrap_or(u64::MAX));
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Timeout as a [`Duration`], if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}
