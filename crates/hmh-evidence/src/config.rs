//! Configuration for the evidence builder

use crate::EvidenceError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Literature API endpoint, identification and limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Base URL of the E-utilities API (`esearch.fcgi` / `efetch.fcgi` are appended)
    pub eutils_base_url: String,

    /// Value of the `tool` parameter identifying this client
    pub tool: String,

    /// Contact address sent as `email`, if any
    pub email: Option<String>,

    /// API key sent as `api_key`, if any
    pub api_key: Option<String>,

    /// Maximum literature records per query
    pub max_results: usize,

    /// Search call timeout in seconds
    pub search_timeout_secs: u64,

    /// Fetch call timeout in seconds
    pub fetch_timeout_secs: u64,

    /// Characters of abstract kept in the snippet
    pub snippet_chars: usize,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            eutils_base_url: "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/".to_string(),
            tool: "med-research-chat".to_string(),
            email: None,
            api_key: None,
            max_results: 10,
            search_timeout_secs: 20,
            fetch_timeout_secs: 25,
            snippet_chars: 600,
        }
    }
}

impl EvidenceConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), EvidenceError> {
        if !self.eutils_base_url.starts_with("http") {
            return Err(EvidenceError::Config(
                "eutils_base_url must be an http(s) URL".to_string(),
            ));
        }
        if self.tool.trim().is_empty() {
            return Err(EvidenceError::Config("tool cannot be empty".to_string()));
        }
        if self.max_results == 0 {
            return Err(EvidenceError::Config(
                "max_results must be greater than 0".to_string(),
            ));
        }
        if self.search_timeout_secs == 0 || self.fetch_timeout_secs == 0 {
            return Err(EvidenceError::Config(
                "timeouts must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML string; missing keys take defaults
    pub fn from_toml(toml_str: &str) -> Result<Self, EvidenceError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.eutils_base_url.trim_end_matches('/'), name)
    }

    pub(crate) fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub(crate) fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
