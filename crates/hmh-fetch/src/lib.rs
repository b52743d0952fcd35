//! Help My Health Fetch Layer
//!
//! Implementations of the `PageFetcher` trait from `hmh-domain`. Every outbound
//! call (site search, web search, topic search, literature API, content pages,
//! reverse geocoding) goes through one of these.
//!
//! # Fetchers
//!
//! - `ReqwestFetcher`: real HTTP via `reqwest`
//! - `MockFetcher`: canned bodies keyed by URL, for deterministic tests
//!
//! # Examples
//!
//! ```
//! use hmh_domain::traits::{FetchRequest, PageFetcher};
//! use hmh_fetch::MockFetcher;
//! use std::time::Duration;
//!
//! let fetcher = MockFetcher::new();
//! fetcher.add_response("https://example.org/page", "<html></html>");
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let body = runtime.block_on(fetcher.fetch(FetchRequest::get(
//!     "https://example.org/page",
//!     Duration::from_secs(1),
//! )));
//! assert_eq!(body.unwrap(), "<html></html>");
//! ```

#![warn(missing_docs)]

pub mod http;

use hmh_domain::traits::{FetchRequest, PageFetcher};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use http::ReqwestFetcher;

/// Errors that can occur during an outbound fetch
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP client could not be constructed
    #[error("Client error: {0}")]
    Client(String),

    /// The request did not complete within its timeout
    #[error("Timed out fetching {url}")]
    Timeout {
        /// Requested URL
        url: String,
    },

    /// Network or protocol failure
    #[error("Request to {url} failed: {message}")]
    Transport {
        /// Requested URL
        url: String,
        /// Underlying error text
        message: String,
    },

    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status {
        /// Requested URL
        url: String,
        /// Status code
        status: u16,
    },

    /// The response body could not be read
    #[error("Invalid body from {url}: {message}")]
    Body {
        /// Requested URL
        url: String,
        /// Underlying error text
        message: String,
    },
}

/// What the mock answers for one URL
#[derive(Debug, Clone)]
enum MockReply {
    Body(String),
    Status(u16),
    Timeout,
}

/// Mock fetcher for deterministic testing
///
/// Replies are keyed by the request URL (query parameters are ignored when
/// matching, but recorded). Unknown URLs answer with HTTP 404.
///
/// Clones share their routes and request log.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    requests: Arc<Mutex<Vec<FetchRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockFetcher {
    /// Create a mock with no routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests for `url` with `body`
    pub fn add_response(&self, url: impl Into<String>, body: impl Into<String>) {
        lock(&self.replies).insert(url.into(), MockReply::Body(body.into()));
    }

    /// Answer requests for `url` with a non-success status
    pub fn add_status(&self, url: impl Into<String>, status: u16) {
        lock(&self.replies).insert(url.into(), MockReply::Status(status));
    }

    /// Answer requests for `url` with a timeout
    pub fn add_timeout(&self, url: impl Into<String>) {
        lock(&self.replies).insert(url.into(), MockReply::Timeout);
    }

    /// Builder form of [`MockFetcher::add_response`]
    pub fn with_response(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.add_response(url, body);
        self
    }

    /// All requests seen so far, in order
    pub fn requests(&self) -> Vec<FetchRequest> {
        lock(&self.requests).clone()
    }

    /// Number of requests seen so far
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Number of requests seen for one URL
    pub fn calls_to(&self, url: &str) -> usize {
        lock(&self.requests).iter().filter(|r| r.url == url).count()
    }

    /// Forget recorded requests (routes are kept)
    pub fn reset_requests(&self) {
        lock(&self.requests).clear();
    }
}

impl PageFetcher for MockFetcher {
    type Error = FetchError;

    async fn fetch(&self, request: FetchRequest) -> Result<String, Self::Error> {
        let url = request.url.clone();
        let reply = lock(&self.replies).get(&url).cloned();
        lock(&self.requests).push(request);

        match reply {
            Some(MockReply::Body(body)) => Ok(body),
            Some(MockReply::Status(status)) => Err(FetchError::Status { url, status }),
            Some(MockReply::Timeout) => Err(FetchError::Timeout { url }),
            None => Err(FetchError::Status { url, status: 404 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmh_domain::traits::FetchMethod;
    use std::time::Duration;

    fn get(url: &str) -> FetchRequest {
        FetchRequest::get(url, Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_mock_returns_body() {
        let fetcher = MockFetcher::new().with_response("https://a.test/x", "hello");
        assert_eq!(fetcher.fetch(get("https://a.test/x")).await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_mock_unknown_url_is_404() {
        let fetcher = MockFetcher::new();
        let err = fetcher.fetch(get("https://a.test/missing")).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_mock_status_and_timeout() {
        let fetcher = MockFetcher::new();
        fetcher.add_status("https://a.test/down", 503);
        fetcher.add_timeout("https://a.test/slow");

        let err = fetcher.fetch(get("https://a.test/down")).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
        let err = fetcher.fetch(get("https://a.test/slow")).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let fetcher = MockFetcher::new().with_response("https://a.test/search", "ok");
        let request = FetchRequest::post_form("https://a.test/search", Duration::from_secs(2))
            .param("q", "cough");

        fetcher.fetch(request).await.unwrap();
        let _ = fetcher.fetch(get("https://a.test/other")).await;

        let seen = fetcher.requests();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].method, FetchMethod::PostForm);
        assert_eq!(seen[0].param_value("q"), Some("cough"));
        assert_eq!(fetcher.calls_to("https://a.test/search"), 1);

        fetcher.reset_requests();
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_clone_shares_state() {
        let first = MockFetcher::new();
        let second = first.clone();
        first.add_response("https://a.test/", "shared");

        assert_eq!(second.fetch(get("https://a.test/")).await.unwrap(), "shared");
        assert_eq!(first.call_count(), 1);
    }
}
