//! Configuration for the candidate locator

use crate::LocatorError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Browser-like User-Agent sent to search pages
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Endpoints, timeouts and result caps for every candidate source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Origin that static-table paths and relative search links resolve against
    pub site_origin: String,

    /// Trusted site's own search results page
    pub site_search_url: String,

    /// Site search timeout in seconds
    pub site_search_timeout_secs: u64,

    /// Maximum site search results
    pub site_search_max_results: usize,

    /// HTML endpoint of the external web search engine
    pub web_search_url: String,

    /// Referer sent with external search requests
    pub web_search_referer: String,

    /// External search timeout in seconds
    pub web_search_timeout_secs: u64,

    /// Maximum external search results
    pub web_search_max_results: usize,

    /// Health-topic search API endpoint
    pub topic_search_url: String,

    /// Database queried on the topic search API
    pub topic_search_db: String,

    /// Topic search timeout in seconds
    pub topic_search_timeout_secs: u64,

    /// Maximum topic search hits
    pub topic_search_max_results: usize,

    /// User-Agent for search requests
    pub user_agent: String,

    /// Keyword table replacing the bundled one
    pub slug_table_path: Option<PathBuf>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            site_origin: "https://www.nhs.uk".to_string(),
            site_search_url: "https://www.nhs.uk/search/results".to_string(),
            site_search_timeout_secs: 12,
            site_search_max_results: 6,
            web_search_url: "https://html.duckduckgo.com/html/".to_string(),
            web_search_referer: "https://html.duckduckgo.com/".to_string(),
            web_search_timeout_secs: 10,
            web_search_max_results: 5,
            topic_search_url: "https://wsearch.nlm.nih.gov/ws/query".to_string(),
            topic_search_db: "healthTopics".to_string(),
            topic_search_timeout_secs: 15,
            topic_search_max_results: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            slug_table_path: None,
        }
    }
}

impl LocatorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LocatorError> {
        let urls = [
            ("site_origin", &self.site_origin),
            ("site_search_url", &self.site_search_url),
            ("web_search_url", &self.web_search_url),
            ("topic_search_url", &self.topic_search_url),
        ];
        for (name, value) in urls {
            url::Url::parse(value).map_err(|e| {
                LocatorError::Config(format!("{} is not a valid URL: {}", name, e))
            })?;
        }

        let timeouts = [
            ("site_search_timeout_secs", self.site_search_timeout_secs),
            ("web_search_timeout_secs", self.web_search_timeout_secs),
            ("topic_search_timeout_secs", self.topic_search_timeout_secs),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, v)| *v == 0) {
            return Err(LocatorError::Config(format!(
                "{} must be greater than 0",
                name
            )));
        }

        let caps = [
            ("site_search_max_results", self.site_search_max_results),
            ("web_search_max_results", self.web_search_max_results),
            ("topic_search_max_results", self.topic_search_max_results),
        ];
        if let Some((name, _)) = caps.iter().find(|(_, v)| *v == 0) {
            return Err(LocatorError::Config(format!(
                "{} must be greater than 0",
                name
            )));
        }

        if self.topic_search_db.trim().is_empty() {
            return Err(LocatorError::Config(
                "topic_search_db cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML string; missing keys take defaults
    pub fn from_toml(toml_str: &str) -> Result<Self, LocatorError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn site_search_timeout(&self) -> Duration {
        Duration::from_secs(self.site_search_timeout_secs)
    }

    pub(crate) fn web_search_timeout(&self) -> Duration {
        Duration::from_secs(self.web_search_timeout_secs)
    }

    pub(crate) fn topic_search_timeout(&self) -> Duration {
        Duration::from_secs(self.topic_search_timeout_secs)
    }
}
