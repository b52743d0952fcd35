//! URL allow-list and hub-page checks

use crate::{TrustConfig, TrustError};
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Outcome of checking one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustVerdict {
    /// Host is on the allow-list
    Trusted,
    /// Host is not acceptable
    Rejected(RejectionReason),
}

/// Reasons for rejecting a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// The URL did not parse
    InvalidUrl(String),

    /// The URL has no host component
    MissingHost,

    /// The host is not a trusted domain or subdomain of one
    UntrustedHost(String),
}

/// The trust filter gates candidate URLs and fetched pages
#[derive(Debug, Clone)]
pub struct TrustFilter {
    config: TrustConfig,
    domains: Vec<String>,
}

impl TrustFilter {
    /// Create a filter from a validated configuration
    pub fn new(config: TrustConfig) -> Result<Self, TrustError> {
        config.validate()?;
        let domains = config
            .trusted_domains
            .iter()
            .map(|d| d.trim().to_ascii_lowercase())
            .collect();
        Ok(Self { config, domains })
    }

    /// Get the filter configuration
    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    /// Check a URL against the allow-list
    ///
    /// The host is lower-cased and a leading `www.` is dropped before it is
    /// compared. Only the parsed host counts; domains that appear in the path
    /// or query never match.
    pub fn check(&self, url: &str) -> TrustVerdict {
        let parsed = match Url::parse(url.trim()) {
            Ok(u) => u,
            Err(e) => return TrustVerdict::Rejected(RejectionReason::InvalidUrl(e.to_string())),
        };
        let Some(host) = parsed.host_str() else {
            return TrustVerdict::Rejected(RejectionReason::MissingHost);
        };
        let host = host.to_ascii_lowercase();
        let bare = host.strip_prefix("www.").unwrap_or(&host);

        let trusted = self.domains.iter().any(|d| {
            bare == d
                || bare
                    .strip_suffix(d.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        });

        if trusted {
            TrustVerdict::Trusted
        } else {
            TrustVerdict::Rejected(RejectionReason::UntrustedHost(host))
        }
    }

    /// Whether a URL's host is trusted
    pub fn is_trusted(&self, url: &str) -> bool {
        match self.check(url) {
            TrustVerdict::Trusted => true,
            TrustVerdict::Rejected(reason) => {
                debug!(url, ?reason, "URL rejected by trust filter");
                false
            }
        }
    }

    /// Whether a fetched page is a known hub / landing page
    ///
    /// Only pages from the configured hub site are considered. The first `h1`
    /// must contain the heading marker and the raw HTML must contain the body
    /// marker (both case-insensitive). Anything else is treated as content.
    pub fn is_hub_page(&self, url: &str, html: &str) -> bool {
        if !url.contains(self.config.hub_site_domain.as_str()) {
            return false;
        }

        let heading = first_h1_text(html).to_lowercase();
        if !heading.contains(&self.config.hub_heading_marker.to_lowercase()) {
            return false;
        }

        let hub = html
            .to_lowercase()
            .contains(&self.config.hub_body_marker.to_lowercase());
        if hub {
            debug!(url, "Hub page detected");
        }
        hub
    }
}

fn first_h1_text(html: &str) -> String {
    let Ok(selector) = Selector::parse("h1") else {
        return String::new();
    };
    let document = Html::parse_document(html);
    document
        .select(&selector)
        .next()
        .map(|h1| {
            h1.text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}
