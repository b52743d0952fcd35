//! Help My Health Domain Layer
//!
//! Value types, fixed vocabularies and pure decision logic shared by every other
//! crate in the workspace. Nothing in here performs I/O; outbound calls are
//! described by the traits in [`traits`] and implemented elsewhere.
//!
//! ## Key Concepts
//!
//! - **Query**: the user's free text plus its normalized form
//! - **Candidate**: a (title, URL) pair that might hold guidance for the query
//! - **EvidenceSource**: a cited source with a reliability grade
//! - **StepBlock**: a titled list of actions shown to the user
//! - **AssistantResponse**: the merged answer returned for one query
//!
//! ## Architecture
//!
//! - Only `serde` (wire shape) and `chrono` (calendar year) as dependencies
//! - Vocabularies are plain data tables in [`vocabulary`]
//! - Classifiers and the reliability table are deterministic functions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod candidate;
pub mod classify;
pub mod evidence;
pub mod guidance;
pub mod query;
pub mod reliability;
pub mod response;
pub mod traits;
pub mod vocabulary;

// Re-exports for convenience
pub use candidate::{dedup_candidates, Candidate};
pub use evidence::{EvidenceSource, Reliability, SourceKind};
pub use guidance::{GuidanceExtractionResult, StepBlock};
pub use query::Query;
pub use reliability::{reliability_from_year_and_n, score_reliability, ReliabilityScore};
pub use response::{AssistantResponse, Triage};
