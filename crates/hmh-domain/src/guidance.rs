//! Guidance step blocks and per-page extraction results

use serde::{Deserialize, Serialize};

/// A titled group of actions with a short justification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepBlock {
    /// Block heading
    pub title: String,
    /// Ordered actions
    pub actions: Vec<String>,
    /// Why these actions help
    pub why: String,
}

impl StepBlock {
    /// Create a new step block
    pub fn new(title: impl Into<String>, actions: Vec<String>, why: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            actions,
            why: why.into(),
        }
    }

    /// Build a block from string literals
    pub fn from_static(title: &str, actions: &[&str], why: &str) -> Self {
        Self::new(
            title,
            actions.iter().map(|a| a.to_string()).collect(),
            why,
        )
    }
}

/// What the guidance pipeline kept from the winning candidate page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuidanceExtractionResult {
    /// Step blocks (empty when no page produced usable steps)
    pub steps: Vec<StepBlock>,
    /// Emergency / urgent-care list, if any page had one
    pub seek_care_now: Option<Vec<String>>,
    /// Prevention tips from the winning page
    pub prevention: Vec<String>,
    /// Causes / related conditions from the winning page
    pub related: Vec<String>,
}

impl GuidanceExtractionResult {
    /// Whether any step block was produced
    pub fn has_steps(&self) -> bool {
        self.steps.iter().any(|b| !b.actions.is_empty())
    }
}
