//! Help My Health Trust Filter
//!
//! Gates candidate URLs before any page is fetched or parsed.
//!
//! The filter provides:
//! - Domain allow-list checks (host equal to, or a subdomain of, a trusted domain)
//! - Hub-page detection for landing pages with no single-topic content
//!
//! # Examples
//!
//! ```
//! use hmh_trust::{TrustConfig, TrustFilter};
//!
//! let filter = TrustFilter::new(TrustConfig::default()).unwrap();
//! assert!(filter.is_trusted("https://www.nhs.uk/conditions/x"));
//! assert!(!filter.is_trusted("https://randomsite.com/nhs.uk.fake"));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod filter;

pub use config::TrustConfig;
pub use error::TrustError;
pub use filter::{RejectionReason, TrustFilter, TrustVerdict};
