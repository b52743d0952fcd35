//! Help My Health Guidance Extractor
//!
//! Pulls structured guidance out of fetched pages from trusted health sites.
//!
//! # Overview
//!
//! Pages are unversioned, undocumented HTML, so every pass is a best-effort
//! heuristic over headings and the lists that follow them. Scope is the page's
//! `main` region when present, else its first `article`, else the document.
//!
//! # Passes
//!
//! - **Do / Don't**: lists after headings that read exactly "Do" or "Don't"
//! - **Action list**: the best action-like list under a self-help heading,
//!   falling back to the first action-like list that is not navigation
//! - **Heading + paragraph**: narrative pages with no lists (site pages only)
//! - **Emergency**: care cards, else lists under urgent-care headings
//! - **Causes**: cause/condition tables, else lists under cause headings
//! - **Prevention**: the list under a prevention heading
//!
//! The list-based passes are [`rules::SectionRule`] values run through one
//! traversal primitive, [`rules::find_sections`].
//!
//! # Example Usage
//!
//! ```
//! use hmh_extractor::{ExtractorConfig, GuidanceExtractor, StepStrategy};
//!
//! let extractor = GuidanceExtractor::new(ExtractorConfig::default()).unwrap();
//! let html = r#"<main>
//!   <h2>Things you can do</h2>
//!   <ul><li>Rest as much as you can</li><li>Drink plenty of fluids</li><li>Take paracetamol</li></ul>
//! </main>"#;
//!
//! let page = extractor.extract("https://www.nhs.uk/conditions/flu/", html);
//! assert_eq!(page.strategy, Some(StepStrategy::ActionList));
//! assert_eq!(page.steps.len(), 3);
//! ```

#![warn(missing_docs)]

mod config;
mod dom;
mod error;
mod extractor;
mod passes;
pub mod rules;


pub use config::ExtractorConfig;
pub use dom::Page;
pub use error::ExtractorError;
pub use extractor::{GuidanceExtractor, PageGuidance, StepOutcome, StepStrategy};
