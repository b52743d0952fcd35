//! Trust filter configuration

use crate::TrustError;
use hmh_domain::vocabulary::{
    HUB_BODY_MARKER, HUB_HEADING_MARKER, SITE_DOMAIN, TRUSTED_GUIDANCE_DOMAINS,
};
use serde::{Deserialize, Serialize};

/// Configuration for the domain allow-list and hub-page detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    /// Trusted guidance domains (a host matches itself and its subdomains)
    pub trusted_domains: Vec<String>,

    /// Domain whose pages are checked for the hub-page pattern
    pub hub_site_domain: String,

    /// Text that the page's first `h1` must contain for a hub page
    pub hub_heading_marker: String,

    /// Text that the page body must contain for a hub page
    pub hub_body_marker: String,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            trusted_domains: TRUSTED_GUIDANCE_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            hub_site_domain: SITE_DOMAIN.to_string(),
            hub_heading_marker: HUB_HEADING_MARKER.to_string(),
            hub_body_marker: HUB_BODY_MARKER.to_string(),
        }
    }
}

impl TrustConfig {
    /// Parse a configuration from TOML text; missing keys take defaults
    pub fn from_toml(text: &str) -> Result<Self, TrustError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can gate anything at all
    pub fn validate(&self) -> Result<(), TrustError> {
        if self.trusted_domains.is_empty() {
            return Err(TrustError::Config(
                "trusted_domains must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self
            .trusted_domains
            .iter()
            .find(|d| d.trim().is_empty() || d.contains('/') || d.starts_with('.'))
        {
            return Err(TrustError::Config(format!(
                "trusted domain '{}' must be a bare host name",
                bad
            )));
        }
        if self.hub_heading_marker.trim().is_empty() || self.hub_body_marker.trim().is_empty() {
            return Err(TrustError::Config(
                "hub-page markers must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
