//! The assistant's answer for one query

use crate::{EvidenceSource, StepBlock};
use serde::{Deserialize, Serialize};

/// Urgency call-out shown above the steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Triage {
    /// Urgency level (currently only "Urgent")
    pub level: String,
    /// One-line summary
    pub headline: String,
    /// Symptoms that need immediate attention
    pub red_flags: Vec<String>,
    /// What to do now
    pub suggested_action: String,
}

/// Top-level response for a query
///
/// `steps` is never empty once the synthesizer has produced the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantResponse {
    /// Present when the query mentions an urgent symptom
    pub triage: Option<Triage>,
    /// Recommended steps
    pub steps: Vec<StepBlock>,
    /// When to seek care immediately
    pub seek_care_now: Vec<String>,
    /// Prevention tips
    pub prevention: Vec<String>,
    /// Related causes / conditions
    pub related: Vec<String>,
    /// Ranked evidence
    pub sources: Vec<EvidenceSource>,
}
