//! Guidance pipeline: locate candidates, then try them one at a time

use crate::{PipelineConfig, SynthesizerError};
use hmh_domain::reliability::current_year;
use hmh_domain::traits::{FetchRequest, PageFetcher};
use hmh_domain::vocabulary::SITE_DOMAIN;
use hmh_domain::{Candidate, EvidenceSource, GuidanceExtractionResult, Query, StepBlock};
use hmh_extractor::{GuidanceExtractor, PageGuidance};
use hmh_locator::{CandidateLocator, TopicHit};
use hmh_trust::TrustFilter;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

const WINNING_BLOCK_TITLE: &str = "Recommended steps (trusted guidance)";

/// Guidance for a query plus every guidance source visited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuidanceOutcome {
    /// What the winning page (if any) produced
    pub result: GuidanceExtractionResult,
    /// Guidance sources, site pages first then topic hits
    pub sources: Vec<EvidenceSource>,
}

/// Stable id for a URL: `prefix-` plus a SHA-256 hex prefix
pub fn source_id(prefix: &str, url: &str, hash_chars: usize) -> String {
    let digest = hex::encode(Sha256::digest(url.as_bytes()));
    let cut = hash_chars.min(digest.len());
    format!("{}-{}", prefix, &digest[..cut])
}

/// Guidance sources in response order, registering each URL at most once
#[derive(Debug, Default)]
struct SourceRegistry {
    site: Vec<EvidenceSource>,
    other: Vec<EvidenceSource>,
    urls: HashSet<String>,
}

impl SourceRegistry {
    /// Site pages go ahead of everything seen so far
    fn push_front(&mut self, source: EvidenceSource) {
        if self.urls.insert(source.url.clone()) {
            self.site.insert(0, source);
        }
    }

    fn push_back(&mut self, source: EvidenceSource) {
        if self.urls.insert(source.url.clone()) {
            self.other.push(source);
        }
    }

    fn into_sources(self) -> Vec<EvidenceSource> {
        self.site.into_iter().chain(self.other).collect()
    }
}

/// Why a candidate did not produce the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    Untrusted,
    FetchFailed,
    HubPage,
    NoSteps,
    RedFlagSteps,
}

impl Skip {
    fn as_str(&self) -> &'static str {
        match self {
            Skip::Untrusted => "untrusted host",
            Skip::FetchFailed => "fetch failed",
            Skip::HubPage => "hub page",
            Skip::NoSteps => "no steps",
            Skip::RedFlagSteps => "steps read as red flags",
        }
    }
}

/// Finds trusted guidance for a query
///
/// Candidates are tried in locator order, one page fetch at a time; the first
/// page with usable steps wins and stops the loop.
pub struct GuidancePipeline<F: PageFetcher> {
    fetcher: Arc<F>,
    locator: CandidateLocator<F>,
    trust: TrustFilter,
    extractor: GuidanceExtractor,
    config: PipelineConfig,
}

impl<F: PageFetcher> GuidancePipeline<F> {
    /// Assemble a pipeline from its parts
    pub fn new(
        fetcher: Arc<F>,
        locator: CandidateLocator<F>,
        trust: TrustFilter,
        extractor: GuidanceExtractor,
        config: PipelineConfig,
    ) -> Result<Self, SynthesizerError> {
        config.validate()?;
        Ok(Self {
            fetcher,
            locator,
            trust,
            extractor,
            config,
        })
    }

    /// Get the pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn topic_source(&self, hit: &TopicHit, year: i32) -> EvidenceSource {
        let snippet = if hit.snippet.is_empty() {
            "Official health guidance."
        } else {
            hit.snippet.as_str()
        };
        EvidenceSource::guidance(
            source_id("mp", &hit.url, self.config.source_id_hash_chars),
            hit.title.clone(),
            "MedlinePlus",
            year,
            hit.url.clone(),
            "Official NIH MedlinePlus topic.",
        )
        .with_snippet(snippet)
    }

    fn page_source(&self, candidate: &Candidate, year: i32) -> (bool, EvidenceSource) {
        let hash_chars = self.config.source_id_hash_chars;
        if candidate.url.contains(SITE_DOMAIN) {
            let source = EvidenceSource::guidance(
                source_id("nhs", &candidate.url, hash_chars),
                candidate.title.clone(),
                "NHS",
                year,
                candidate.url.clone(),
                "NHS Condition Page",
            )
            .with_snippet("Official NHS guidance.");
            return (true, source);
        }

        let publisher = url::Url::parse(&candidate.url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
            .unwrap_or_else(|| "Trusted guidance".to_string());
        let source = EvidenceSource::guidance(
            source_id("web", &candidate.url, hash_chars),
            candidate.title.clone(),
            publisher,
            year,
            candidate.url.clone(),
            "Trusted health guidance page.",
        )
        .with_snippet("Official health guidance.");
        (false, source)
    }

    async fn fetch_page(&self, url: &str) -> Option<String> {
        let request = FetchRequest::get(url, self.config.page_timeout())
            .header("User-Agent", &self.config.page_user_agent);
        match self.fetcher.fetch(request).await {
            Ok(body) => Some(body),
            Err(e) => {
                debug!(url, error = %e, "Candidate fetch failed");
                None
            }
        }
    }

    /// Fetch, register and extract one candidate
    async fn try_candidate(
        &self,
        candidate: &Candidate,
        registry: &mut SourceRegistry,
        year: i32,
    ) -> Result<PageGuidance, (Skip, Option<PageGuidance>)> {
        if !self.trust.is_trusted(&candidate.url) {
            return Err((Skip::Untrusted, None));
        }
        let Some(html) = self.fetch_page(&candidate.url).await else {
            return Err((Skip::FetchFailed, None));
        };
        if self.trust.is_hub_page(&candidate.url, &html) {
            return Err((Skip::HubPage, None));
        }

        match self.page_source(candidate, year) {
            (true, source) => registry.push_front(source),
            (false, source) => registry.push_back(source),
        }

        let page = self.extractor.extract(&candidate.url, &html);
        if page.has_usable_steps() {
            Ok(page)
        } else if page.steps.is_empty() {
            Err((Skip::NoSteps, Some(page)))
        } else {
            Err((Skip::RedFlagSteps, Some(page)))
        }
    }

    /// Guidance and guidance sources for a query; never fails
    pub async fn fetch_guidance(&self, query: &Query) -> GuidanceOutcome {
        let year = current_year();
        let located = self.locator.locate_with_topics(query).await;

        let mut registry = SourceRegistry::default();
        for hit in &located.topics {
            registry.push_back(self.topic_source(hit, year));
        }

        let mut first_emergency: Option<Vec<String>> = None;
        let mut result = GuidanceExtractionResult::default();

        for candidate in &located.candidates {
            match self.try_candidate(candidate, &mut registry, year).await {
                Ok(page) => {
                    info!(
                        url = %candidate.url,
                        strategy = ?page.strategy,
                        steps = page.steps.len(),
                        "Guidance found"
                    );
                    let emergency = if page.emergency.is_empty() {
                        first_emergency.take()
                    } else {
                        Some(page.emergency)
                    };
                    result = GuidanceExtractionResult {
                        steps: vec![StepBlock::new(
                            WINNING_BLOCK_TITLE,
                            page.steps,
                            format!("Extracted from: {}", candidate.title),
                        )],
                        seek_care_now: emergency,
                        prevention: page.prevention,
                        related: page.causes,
                    };
                    break;
                }
                Err((skip, page)) => {
                    debug!(url = %candidate.url, reason = skip.as_str(), "Candidate skipped");
                    if let Some(page) = page {
                        if first_emergency.is_none() && !page.emergency.is_empty() {
                            first_emergency = Some(page.emergency);
                        }
                    }
                }
            }
        }

        if !result.has_steps() {
            result.seek_care_now = first_emergency;
        }
        let sources = registry.into_sources();
        info!(
            candidates = located.candidates.len(),
            sources = sources.len(),
            found = result.has_steps(),
            "Guidance pipeline finished"
        );
        GuidanceOutcome { result, sources }
    }
}
