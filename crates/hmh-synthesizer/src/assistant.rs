//! The assistant: guidance pipeline, literature evidence and synthesis for one query

use crate::pipeline::GuidancePipeline;
use crate::synthesizer::synthesize;
use crate::{PipelineConfig, SynthesizerError};
use hmh_domain::traits::PageFetcher;
use hmh_domain::{AssistantResponse, Query};
use hmh_evidence::{EvidenceBuilder, EvidenceConfig};
use hmh_extractor::{ExtractorConfig, GuidanceExtractor};
use hmh_locator::{CandidateLocator, LocatorConfig};
use hmh_trust::{TrustConfig, TrustFilter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Configuration for every component behind the assistant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Candidate sources
    pub locator: LocatorConfig,
    /// Literature search
    pub evidence: EvidenceConfig,
    /// Page extraction
    pub extractor: ExtractorConfig,
    /// Trusted domains
    pub trust: TrustConfig,
    /// Candidate loop and response shaping
    pub pipeline: PipelineConfig,
}

/// Answers health questions from trusted guidance and the literature
///
/// Every outbound call goes through one [`PageFetcher`], so the whole
/// assistant can run against a mock.
pub struct HealthAssistant<F: PageFetcher> {
    pipeline: GuidancePipeline<F>,
    evidence: EvidenceBuilder<F>,
}

impl AssistantConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), SynthesizerError> {
        self.locator.validate()?;
        self.evidence.validate()?;
        self.extractor.validate()?;
        self.trust.validate()?;
        self.pipeline.validate()
    }
}

impl<F: PageFetcher> HealthAssistant<F> {
    /// Build every component from configuration
    pub fn new(fetcher: Arc<F>, config: AssistantConfig) -> Result<Self, SynthesizerError> {
        let locator = CandidateLocator::new(Arc::clone(&fetcher), config.locator)?;
        let trust = TrustFilter::new(config.trust)?;
        let extractor = GuidanceExtractor::new(config.extractor)?;
        let evidence = EvidenceBuilder::new(Arc::clone(&fetcher), config.evidence)?;
        let pipeline = GuidancePipeline::new(fetcher, locator, trust, extractor, config.pipeline)?;

        Ok(Self { pipeline, evidence })
    }

    /// Answer one query; never fails
    pub async fn answer(&self, query: &Query) -> AssistantResponse {
        info!(query = query.raw(), "Answering query");
        let guidance = self.pipeline.fetch_guidance(query).await;
        let literature = self.evidence.build_evidence(query).await;
        synthesize(query, guidance, literature, self.pipeline.config())
    }
}
