//! Evidence builder: literature records scored and shaped as sources

use crate::pubmed::{self, ArticleRecord};
use crate::sample_size::infer_sample_size;
use crate::{EvidenceConfig, EvidenceError};
use hmh_domain::reliability::{current_year, score_reliability};
use hmh_domain::traits::PageFetcher;
use hmh_domain::{EvidenceSource, Query, SourceKind};
use std::sync::Arc;
use tracing::{debug, info, warn};

const RECORD_URL_BASE: &str = "https://pubmed.ncbi.nlm.nih.gov/";
const NO_ABSTRACT: &str = "No abstract available.";
const SAMPLE_SIZE_NOTE: &str = " Sample size inferred from abstract when available.";

/// Shape one literature record as a scored evidence source
pub fn evidence_from_article(
    article: &ArticleRecord,
    snippet_chars: usize,
    current_year: i32,
) -> EvidenceSource {
    let sample_size = infer_sample_size(&article.abstract_text);
    let score = score_reliability(Some(article.year), sample_size, current_year);

    let snippet = if article.abstract_text.is_empty() {
        NO_ABSTRACT.to_string()
    } else {
        let head: String = article.abstract_text.chars().take(snippet_chars).collect();
        format!("{}...", head)
    };
    let url = if article.pmid.is_empty() {
        RECORD_URL_BASE.to_string()
    } else {
        format!("{}{}/", RECORD_URL_BASE, article.pmid)
    };

    EvidenceSource {
        id: format!("pubmed-{}", article.pmid),
        title: article.title.clone(),
        publisher: article.journal.clone(),
        year: article.year,
        kind: SourceKind::PubMedStudy,
        url,
        reliability: score.reliability,
        rationale: format!("{}{}", score.rationale, SAMPLE_SIZE_NOTE),
        sample_size,
        snippet: Some(snippet),
    }
}

/// Builds literature evidence for a query
pub struct EvidenceBuilder<F: PageFetcher> {
    fetcher: Arc<F>,
    config: EvidenceConfig,
}

impl<F: PageFetcher> EvidenceBuilder<F> {
    /// Create a builder with a validated configuration
    pub fn new(fetcher: Arc<F>, config: EvidenceConfig) -> Result<Self, EvidenceError> {
        config.validate()?;
        Ok(Self { fetcher, config })
    }

    /// Get the builder configuration
    pub fn config(&self) -> &EvidenceConfig {
        &self.config
    }

    /// Relevance-ordered literature ids for a term
    pub async fn search_ids(&self, term: &str) -> Result<Vec<String>, EvidenceError> {
        let body = self
            .fetcher
            .fetch(pubmed::search_request(&self.config, term))
            .await
            .map_err(|e| EvidenceError::Fetch {
                stage: "search",
                message: e.to_string(),
            })?;
        let mut ids = pubmed::parse_search_ids(&body)?;
        ids.truncate(self.config.max_results);
        Ok(ids)
    }

    /// Full records for a batch of ids; no request is made for an empty batch
    pub async fn fetch_articles(&self, ids: &[String]) -> Result<Vec<ArticleRecord>, EvidenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let body = self
            .fetcher
            .fetch(pubmed::fetch_request(&self.config, ids))
            .await
            .map_err(|e| EvidenceError::Fetch {
                stage: "fetch",
                message: e.to_string(),
            })?;
        pubmed::parse_articles(&body, current_year())
    }

    /// Scored literature sources in relevance order, or the first error
    pub async fn try_build_evidence(&self, query: &Query) -> Result<Vec<EvidenceSource>, EvidenceError> {
        let ids = self.search_ids(query.raw()).await?;
        debug!(ids = ids.len(), "Literature search returned ids");

        let articles = self.fetch_articles(&ids).await?;
        let year = current_year();
        let sources: Vec<EvidenceSource> = articles
            .iter()
            .map(|a| evidence_from_article(a, self.config.snippet_chars, year))
            .collect();

        info!(records = sources.len(), "Built literature evidence");
        Ok(sources)
    }

    /// Scored literature sources in relevance order; empty on failure
    pub async fn build_evidence(&self, query: &Query) -> Vec<EvidenceSource> {
        self.try_build_evidence(query).await.unwrap_or_else(|e| {
            warn!("Literature search failed: {}", e);
            Vec::new()
        })
    }
}
