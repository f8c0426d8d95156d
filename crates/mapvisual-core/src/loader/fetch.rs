// crates/mapvisual-core/src/loader/fetch.rs

//! HTTP client abstraction for remote boundary providers.

use crate::error::{BoundaryError, Result};
use std::time::Duration;

/// Default per-request timeout for remote providers.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Synchronous HTTP GET.
///
/// Exists so tests (and callers that bring their own client) can swap the
/// transport without touching the fallback logic.
pub trait HttpClient: Send + Sync {
    /// Fetches `url` and returns the response body.
    ///
    /// Non-2xx responses are errors. Implementations must not retry: a failed
    /// fetch moves the chain to its next source.
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// Client used when remote fetching is unavailable (offline runs, or builds
/// without the `fetch` feature). Every request fails immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNetwork;

impl HttpClient for NoNetwork {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        Err(BoundaryError::Http(format!(
            "remote fetching disabled, not requesting {url}"
        )))
    }
}

/// Real HTTP client implementation using reqwest.
#[cfg(feature = "fetch")]
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "fetch")]
const USER_AGENT: &str = concat!("mapvisual/", env!("CARGO_PKG_VERSION"));

#[cfg(feature = "fetch")]
impl ReqwestClient {
    /// Creates a client with [`DEFAULT_FETCH_TIMEOUT`].
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    /// Creates a client whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| BoundaryError::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[cfg(feature = "fetch")]
impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().map_err(|e| {
            tracing::debug!(url, is_timeout = e.is_timeout(), "request failed");
            BoundaryError::Http(format!("Request failed: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(BoundaryError::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| BoundaryError::Http(format!("Failed to read response: {e}")))
    }
}
