//! Real HTTP fetcher
//!
//! Every request is attempted exactly once with its own timeout. Non-success
//! statuses are errors; the caller decides what a failed source means.
//!
//! # Examples
//!
//! ```no_run
//! use hmh_fetch::ReqwestFetcher;
//!
//! let fetcher = ReqwestFetcher::new("Mozilla/5.0 (compatible; HelpMyHealth/1.0)").unwrap();
//! ```

use crate::FetchError;
use hmh_domain::traits::{FetchMethod, FetchRequest, PageFetcher};
use tracing::debug;

/// `PageFetcher` backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Create a fetcher that sends `user_agent` on every request
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the TLS backend cannot be initialized.
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn build(&self, request: &FetchRequest) -> reqwest::RequestBuilder {
        let mut builder = match request.method {
            FetchMethod::Get => self.client.get(&request.url).query(&request.params),
            FetchMethod::PostForm => self.client.post(&request.url).form(&request.params),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.timeout(request.timeout)
    }
}

fn classify(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

impl PageFetcher for ReqwestFetcher {
    type Error = FetchError;

    async fn fetch(&self, request: FetchRequest) -> Result<String, Self::Error> {
        debug!(url = %request.url, method = ?request.method, "Outbound request");

        let response = self
            .build(&request)
            .send()
            .await
            .map_err(|e| classify(&request.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: request.url,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: request.url.clone(),
                }
            } else {
                FetchError::Body {
                    url: request.url.clone(),
                    message: e.to_string(),
                }
            }
        })
    }
}
