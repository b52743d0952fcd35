//! Trait definitions for external interactions
//!
//! Every outbound HTTP call goes through [`PageFetcher`]. The infrastructure
//! implementation lives in `hmh-fetch`; tests substitute an in-memory one.

use std::future::Future;
use std::time::Duration;

/// HTTP method of an outbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMethod {
    /// GET with `params` encoded into the query string
    Get,
    /// POST with `params` sent as an urlencoded form body
    PostForm,
}

/// One outbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// HTTP method
    pub method: FetchMethod,
    /// Absolute URL without the query string
    pub url: String,
    /// Query-string or form parameters, in order
    pub params: Vec<(String, String)>,
    /// Extra request headers
    pub headers: Vec<(String, String)>,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl FetchRequest {
    /// A GET request with no parameters
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method: FetchMethod::Get,
            url: url.into(),
            params: Vec::new(),
            headers: Vec::new(),
            timeout,
        }
    }

    /// A form POST request with no parameters
    pub fn post_form(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method: FetchMethod::PostForm,
            ..Self::get(url, timeout)
        }
    }

    /// Append a parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Append a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Value of the first parameter named `key`
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Trait for fetching remote documents as text
///
/// Implemented by the infrastructure layer (hmh-fetch)
pub trait PageFetcher: Send + Sync {
    /// Error type for fetch operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Perform the request and return the response body
    ///
    /// Non-success statuses, timeouts and transport failures are errors.
    fn fetch(&self, request: FetchRequest)
        -> impl Future<Output = Result<String, Self::Error>> + Send;
}
