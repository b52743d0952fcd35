//! Candidate locator: every source, in priority order

use crate::static_table::SlugTable;
use crate::topic_search::{self, TopicHit};
use crate::{site_search, web_search, LocatorConfig, LocatorError};
use hmh_domain::traits::PageFetcher;
use hmh_domain::{dedup_candidates, Candidate, Query};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Candidates for one query plus the topic hits they include
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Located {
    /// Deduplicated candidates, static table first and topic hits last
    pub candidates: Vec<Candidate>,
    /// Topic hits as returned by the topic search
    pub topics: Vec<TopicHit>,
}

/// Finds candidate guidance pages for a query
///
/// Sources run one after another and a failing source contributes nothing.
pub struct CandidateLocator<F: PageFetcher> {
    fetcher: Arc<F>,
    table: SlugTable,
    config: LocatorConfig,
}

impl<F: PageFetcher> CandidateLocator<F> {
    /// Create a locator
    ///
    /// Loads the keyword table from `config.slug_table_path` when set, else
    /// uses the bundled table.
    pub fn new(fetcher: Arc<F>, config: LocatorConfig) -> Result<Self, LocatorError> {
        config.validate()?;
        let table = match &config.slug_table_path {
            Some(path) => SlugTable::from_path(path)?,
            None => SlugTable::bundled()?,
        };
        info!(keys = table.len(), "Keyword table loaded");
        Ok(Self {
            fetcher,
            table,
            config,
        })
    }

    /// Replace the keyword table
    pub fn with_table(mut self, table: SlugTable) -> Self {
        self.table = table;
        self
    }

    /// Get the locator configuration
    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Static keyword-table candidates
    pub fn static_candidates(&self, query: &Query) -> Vec<Candidate> {
        self.table.lookup(query.normalized(), &self.config.site_origin)
    }

    /// Site search results, or the error that stopped them
    pub async fn try_site_search(&self, query: &Query) -> Result<Vec<Candidate>, LocatorError> {
        let body = self
            .fetcher
            .fetch(site_search::request(&self.config, query.raw()))
            .await
            .map_err(|e| LocatorError::Fetch {
                source_name: "site search",
                message: e.to_string(),
            })?;
        Ok(site_search::parse_site_results(
            &body,
            &self.config.site_origin,
            self.config.site_search_max_results,
        ))
    }

    /// Site search results; empty on failure
    pub async fn site_search(&self, query: &Query) -> Vec<Candidate> {
        self.try_site_search(query).await.unwrap_or_else(|e| {
            warn!("Site search failed: {}", e);
            Vec::new()
        })
    }

    /// External search results, or the error that stopped them
    pub async fn try_web_search(&self, query: &Query) -> Result<Vec<Candidate>, LocatorError> {
        let body = self
            .fetcher
            .fetch(web_search::request(&self.config, query.raw()))
            .await
            .map_err(|e| LocatorError::Fetch {
                source_name: "web search",
                message: e.to_string(),
            })?;
        Ok(web_search::parse_web_results(
            &body,
            self.config.web_search_max_results,
        ))
    }

    /// External search results; empty on failure
    pub async fn web_search(&self, query: &Query) -> Vec<Candidate> {
        self.try_web_search(query).await.unwrap_or_else(|e| {
            warn!("Web search failed: {}", e);
            Vec::new()
        })
    }

    /// Topic search hits, or the error that stopped them
    pub async fn try_topic_search(&self, query: &Query) -> Result<Vec<TopicHit>, LocatorError> {
        let body = self
            .fetcher
            .fetch(topic_search::request(&self.config, query.raw()))
            .await
            .map_err(|e| LocatorError::Fetch {
                source_name: "topic search",
                message: e.to_string(),
            })?;
        topic_search::parse_topic_results(&body, self.config.topic_search_max_results)
    }

    /// Topic search hits; empty on failure
    pub async fn topic_search(&self, query: &Query) -> Vec<TopicHit> {
        self.try_topic_search(query).await.unwrap_or_else(|e| {
            warn!("Topic search failed: {}", e);
            Vec::new()
        })
    }

    /// Ordered, deduplicated candidates for a query
    pub async fn locate(&self, query: &Query) -> Vec<Candidate> {
        self.locate_with_topics(query).await.candidates
    }

    /// Ordered, deduplicated candidates plus the raw topic hits
    ///
    /// Order: static table, site search, external search, topic search. The
    /// first occurrence of a URL wins.
    pub async fn locate_with_topics(&self, query: &Query) -> Located {
        let topics = self.topic_search(query).await;

        let from_table = self.static_candidates(query);
        let from_site = self.site_search(query).await;
        let from_web = self.web_search(query).await;
        debug!(
            table = from_table.len(),
            site = from_site.len(),
            web = from_web.len(),
            topics = topics.len(),
            "Candidates per source"
        );

        let all: Vec<Candidate> = from_table
            .into_iter()
            .chain(from_site)
            .chain(from_web)
            .chain(topics.iter().map(Candidate::from))
            .collect();
        let candidates = dedup_candidates(all);
        info!(candidates = candidates.len(), "Located candidates");

        Located { candidates, topics }
    }
}
