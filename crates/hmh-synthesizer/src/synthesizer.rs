//! Response synthesis: merge guidance, literature and fallbacks into one answer

use crate::pipeline::GuidanceOutcome;
use crate::prevention::prevention_tips;
use crate::templates::{symptom_steps, StepsTier};
use crate::PipelineConfig;
use hmh_domain::classify::is_urgent_query;
use hmh_domain::{AssistantResponse, EvidenceSource, Query, Triage};
use tracing::info;

const URGENT_RED_FLAGS: &[&str] = &[
    "Trouble breathing or chest pain",
    "Fainting, confusion, or severe weakness",
    "Severe allergic reaction (swelling/wheeze)",
    "Sudden severe headache or stroke-like symptoms",
];

/// The fixed urgent triage record, when the query text calls for it
pub fn triage_for(query: &Query) -> Option<Triage> {
    if !is_urgent_query(query.normalized()) {
        return None;
    }
    Some(Triage {
        level: "Urgent".to_string(),
        headline: "This may be urgent based on what you wrote.".to_string(),
        red_flags: URGENT_RED_FLAGS.iter().map(|s| s.to_string()).collect(),
        suggested_action: "Seek urgent medical care now.".to_string(),
    })
}

/// Merge everything gathered for a query into the final response
///
/// Sources are guidance first then literature. Steps always end up non-empty.
pub fn synthesize(
    query: &Query,
    guidance: GuidanceOutcome,
    literature: Vec<EvidenceSource>,
    config: &PipelineConfig,
) -> AssistantResponse {
    let GuidanceOutcome { result, sources } = guidance;
    let sources: Vec<EvidenceSource> = sources.into_iter().chain(literature).collect();

    let template = symptom_steps(query.normalized(), &sources, config.top_source_snippet_chars);
    let (tier, steps) = if result.has_steps() {
        (StepsTier::Guidance, result.steps)
    } else {
        (template.tier, template.steps)
    };

    let seek_care_now = result
        .seek_care_now
        .filter(|items| !items.is_empty())
        .unwrap_or(template.red_flags);

    let prevention = if result.prevention.is_empty() {
        prevention_tips(&sources, config)
    } else {
        result.prevention
    };

    let triage = triage_for(query);
    info!(
        tier = tier.as_str(),
        urgent = triage.is_some(),
        sources = sources.len(),
        "Response synthesized"
    );

    AssistantResponse {
        triage,
        steps,
        seek_care_now,
        prevention,
        related: result.related,
        sources,
    }
}
