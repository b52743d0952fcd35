//! Help My Health Evidence Builder
//!
//! Turns a query into scored literature sources using a two-call protocol
//! against the E-utilities API:
//!
//! 1. **search**: query -> up to N relevance-ordered ids (JSON)
//! 2. **fetch**: ids -> article records (XML)
//!
//! Each record's abstract is scanned for a study size, and the record is
//! graded with the fixed recency/size table from
//! [`hmh_domain::reliability`].
//!
//! # Example Usage
//!
//! ```
//! use hmh_evidence::infer_sample_size;
//!
//! assert_eq!(infer_sample_size("A total of n=240 patients were enrolled"), Some(240));
//! assert_eq!(infer_sample_size("1,234 participants were randomized"), Some(1234));
//! assert_eq!(infer_sample_size("No numbers here"), None);
//! ```

#![warn(missing_docs)]

mod builder;
mod config;
mod error;
pub mod pubmed;
mod sample_size;

pub use builder::{evidence_from_article, EvidenceBuilder};
pub use config::EvidenceConfig;
pub use error::EvidenceError;
pub use pubmed::ArticleRecord;
pub use sample_size::{infer_sample_size, MAX_SAMPLE_SIZE};
