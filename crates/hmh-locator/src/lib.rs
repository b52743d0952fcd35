//! Help My Health Candidate Locator
//!
//! Proposes pages that might hold guidance for a query, from four sources
//! tried in a fixed order:
//!
//! 1. a static keyword -> path table (with a few priority overrides)
//! 2. the trusted site's own search page
//! 3. a domain-scoped external web search
//! 4. a health-topic search API
//!
//! Results are concatenated in that order and deduplicated by exact URL.
//! All remote calls go through a [`PageFetcher`](hmh_domain::traits::PageFetcher).
//!
//! # Example Usage
//!
//! ```
//! use hmh_locator::SlugTable;
//!
//! let table = SlugTable::bundled().unwrap();
//! let found = table.lookup("i have a sore throat", "https://www.nhs.uk");
//! assert_eq!(found[0].url, "https://www.nhs.uk/conditions/sore-throat/");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod locator;
pub mod site_search;
pub mod static_table;
pub mod topic_search;
pub mod web_search;

pub use config::{LocatorConfig, DEFAULT_USER_AGENT};
pub use error::LocatorError;
pub use locator::{CandidateLocator, Located};
pub use static_table::SlugTable;
pub use topic_search::TopicHit;
