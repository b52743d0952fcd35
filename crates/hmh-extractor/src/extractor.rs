//! Guidance extractor and step strategies

use crate::dom::Page;
use crate::{passes, ExtractorConfig, ExtractorError};
use hmh_domain::classify::looks_like_red_flag_list;
use tracing::debug;

/// A way of producing step items from a page, tried in [`StepStrategy::ORDERED`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStrategy {
    /// Lists under "Do" / "Don't" headings
    DoDont,
    /// The best action-like list under a self-help heading
    ActionList,
    /// Narrative headings with their first paragraph (site pages only)
    HeadingParagraphs,
}

/// What a strategy produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Strategy that produced the outcome
    pub strategy: StepStrategy,
    /// Step items (may be empty when only a Don't list was found)
    pub steps: Vec<String>,
    /// Things to avoid (the Don't list)
    pub avoid: Vec<String>,
}

impl StepStrategy {
    /// Strategies in the order they are tried; the first `Some` stops the chain
    pub const ORDERED: [StepStrategy; 3] = [
        StepStrategy::DoDont,
        StepStrategy::ActionList,
        StepStrategy::HeadingParagraphs,
    ];

    /// Whether the strategy may run on a page from `url`
    pub fn applies_to(self, url: &str, config: &ExtractorConfig) -> bool {
        match self {
            StepStrategy::HeadingParagraphs => url.contains(config.narrative_site_domain.as_str()),
            StepStrategy::DoDont | StepStrategy::ActionList => true,
        }
    }

    fn try_extract(self, page: &Page, config: &ExtractorConfig) -> Option<StepOutcome> {
        let (steps, avoid) = match self {
            StepStrategy::DoDont => passes::do_dont(page, config),
            StepStrategy::ActionList => (passes::action_steps(page, config), Vec::new()),
            StepStrategy::HeadingParagraphs => {
                (passes::heading_paragraphs(page, config), Vec::new())
            }
        };
        if steps.is_empty() && avoid.is_empty() {
            return None;
        }
        Some(StepOutcome {
            strategy: self,
            steps,
            avoid,
        })
    }
}

/// Everything extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageGuidance {
    /// Strategy that produced the steps, if any did
    pub strategy: Option<StepStrategy>,
    /// Step items
    pub steps: Vec<String>,
    /// Urgent-care items
    pub emergency: Vec<String>,
    /// Causes / related conditions
    pub causes: Vec<String>,
    /// Prevention items (the Don't list when there is one)
    pub prevention: Vec<String>,
}

impl PageGuidance {
    /// Steps are present and do not read as an emergency list
    pub fn has_usable_steps(&self) -> bool {
        !self.steps.is_empty() && !looks_like_red_flag_list(&self.steps)
    }
}

/// Extracts structured guidance from trusted HTML pages
#[derive(Debug, Clone, Default)]
pub struct GuidanceExtractor {
    config: ExtractorConfig,
}

impl GuidanceExtractor {
    /// Create an extractor with a validated configuration
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the extractor configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Run every pass over one page
    ///
    /// Step strategies are tried in order and stop at the first one that
    /// yields anything. Emergency, cause and prevention passes always run.
    pub fn extract(&self, url: &str, html: &str) -> PageGuidance {
        let page = Page::parse(html);

        let outcome = StepStrategy::ORDERED
            .into_iter()
            .filter(|s| s.applies_to(url, &self.config))
            .find_map(|s| s.try_extract(&page, &self.config));

        let (strategy, steps, avoid) = match outcome {
            Some(o) => (Some(o.strategy), o.steps, o.avoid),
            None => (None, Vec::new(), Vec::new()),
        };

        let prevention = if avoid.is_empty() {
            passes::prevention(&page, &self.config)
        } else {
            avoid
        };

        let guidance = PageGuidance {
            strategy,
            steps,
            emergency: passes::emergency(&page, &self.config),
            causes: passes::causes(&page, &self.config),
            prevention,
        };

        debug!(
            url,
            strategy = ?guidance.strategy,
            steps = guidance.steps.len(),
            emergency = guidance.emergency.len(),
            causes = guidance.causes.len(),
            prevention = guidance.prevention.len(),
            "Extracted page guidance"
        );
        guidance
    }

    /// Do and Don't lists of a page
    pub fn do_dont(&self, html: &str) -> (Vec<String>, Vec<String>) {
        passes::do_dont(&Page::parse(html), &self.config)
    }

    /// Action-list steps of a page
    pub fn action_steps(&self, html: &str) -> Vec<String> {
        passes::action_steps(&Page::parse(html), &self.config)
    }

    /// Heading+paragraph steps of a page
    pub fn heading_paragraphs(&self, html: &str) -> Vec<String> {
        passes::heading_paragraphs(&Page::parse(html), &self.config)
    }

    /// Urgent-care items of a page
    pub fn emergency(&self, html: &str) -> Vec<String> {
        passes::emergency(&Page::parse(html), &self.config)
    }

    /// Causes / related conditions of a page
    pub fn causes(&self, html: &str) -> Vec<String> {
        passes::causes(&Page::parse(html), &self.config)
    }

    /// Prevention items of a page
    pub fn prevention(&self, html: &str) -> Vec<String> {
        passes::prevention(&Page::parse(html), &self.config)
    }
}
