//! Help My Health Synthesizer
//!
//! Turns a query into an [`AssistantResponse`](hmh_domain::AssistantResponse).
//!
//! # Flow
//!
//! 1. [`GuidancePipeline`] asks the locator for candidates and tries them in
//!    order: trust check, page fetch, hub-page check, extraction. The first page
//!    with usable steps wins.
//! 2. The evidence builder searches the literature.
//! 3. [`synthesize`] merges both with the fixed fallbacks, so `steps` is never
//!    empty and a failed source only means fewer sources.
//!
//! [`HealthAssistant`] wires all of this from one [`AssistantConfig`].
//!
//! # Example Usage
//!
//! ```
//! use hmh_domain::Query;
//! use hmh_synthesizer::templates::{symptom_steps, StepsTier};
//!
//! let query = Query::parse("I have a nose bleed").unwrap();
//! let template = symptom_steps(query.normalized(), &[], 200);
//! assert_eq!(template.tier, StepsTier::Nosebleed);
//! assert_eq!(template.red_flags.len(), 5);
//! ```

#![warn(missing_docs)]

mod assistant;
mod config;
mod error;
pub mod pipeline;
pub mod prevention;
mod synthesizer;
pub mod templates;

pub use assistant::{AssistantConfig, HealthAssistant};
pub use config::PipelineConfig;
pub use error::SynthesizerError;
pub use pipeline::{source_id, GuidanceOutcome, GuidancePipeline};
pub use synthesizer::{synthesize, triage_for};
