//! Section rules
//!
//! Every list-based pass is "find a list after a qualifying heading". A
//! [`SectionRule`] names which headings qualify, how to reach the list from the
//! heading and which items survive; [`find_sections`] runs it over a page.

use crate::dom::{self, Page, LIST_TAGS};
use scraper::ElementRef;

/// Decides whether a heading's text qualifies
#[derive(Debug, Clone, Copy)]
pub enum HeadingMatcher {
    /// Whole (lower-cased, collapsed) heading equals one of the phrases
    Exact(&'static [&'static str]),
    /// Heading contains one of `any` and none of `exclude`
    Contains {
        /// Phrases of which at least one must appear
        any: &'static [&'static str],
        /// Phrases of which none may appear
        exclude: &'static [&'static str],
    },
    /// Any non-empty heading without an excluded phrase
    AnyExcept(&'static [&'static str]),
}

impl HeadingMatcher {
    /// Test lower-cased heading text
    pub fn matches(&self, text: &str) -> bool {
        match self {
            HeadingMatcher::Exact(phrases) => phrases.contains(&text),
            HeadingMatcher::Contains { any, exclude } => {
                any.iter().any(|p| text.contains(p)) && !exclude.iter().any(|p| text.contains(p))
            }
            HeadingMatcher::AnyExcept(exclude) => {
                !text.is_empty() && !exclude.iter().any(|p| text.contains(p))
            }
        }
    }
}

/// How the list is reached from its heading
#[derive(Debug, Clone, Copy)]
pub enum ListLocator {
    /// Walk the heading's following siblings until one of `stop_at`
    FollowingSiblings {
        /// Tags that end the section
        stop_at: &'static [&'static str],
    },
    /// The next list after the heading in document order
    NextInDocument,
}

/// Which list items are kept
#[derive(Debug, Clone, Copy)]
pub enum ItemFilter {
    /// Drop empty items
    NonEmpty,
    /// Keep items whose character count is within `min..=max`
    Length {
        /// Shortest accepted item
        min: usize,
        /// Longest accepted item
        max: usize,
    },
}

impl ItemFilter {
    /// Apply the filter
    pub fn apply(&self, items: Vec<String>) -> Vec<String> {
        match *self {
            ItemFilter::NonEmpty => items.into_iter().filter(|i| !i.is_empty()).collect(),
            ItemFilter::Length { min, max } => items
                .into_iter()
                .filter(|i| (min..=max).contains(&i.chars().count()))
                .collect(),
        }
    }
}

/// One "list after a qualifying heading" rule
#[derive(Debug, Clone, Copy)]
pub struct SectionRule {
    /// Heading tags considered
    pub levels: &'static [&'static str],
    /// Heading qualification
    pub heading: HeadingMatcher,
    /// Heading-to-list navigation
    pub locator: ListLocator,
    /// Item filtering
    pub filter: ItemFilter,
    /// Keep walking past lists that filter down to nothing
    pub skip_empty_lists: bool,
    /// Ignore headings and lists inside page chrome
    pub skip_chrome: bool,
}

/// A qualifying heading and the items of the list found for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMatch {
    /// Lower-cased heading text
    pub heading: String,
    /// Filtered list items
    pub items: Vec<String>,
}

/// Run a rule over a page, one match per qualifying heading that has a list
pub fn find_sections(page: &Page, rule: &SectionRule) -> Vec<SectionMatch> {
    let elements: Vec<ElementRef<'_>> = page
        .elements()
        .into_iter()
        .filter(|e| !(rule.skip_chrome && dom::in_chrome(e)))
        .collect();

    let mut out = Vec::new();
    for (index, el) in elements.iter().enumerate() {
        if !dom::is_named(el, rule.levels) {
            continue;
        }
        let heading = dom::heading_text(*el);
        if !rule.heading.matches(&heading) {
            continue;
        }

        let items = match rule.locator {
            ListLocator::FollowingSiblings { stop_at } => sibling_list(*el, stop_at, rule),
            ListLocator::NextInDocument => elements[index + 1..]
                .iter()
                .find(|e| dom::is_named(e, LIST_TAGS))
                .map(|list| rule.filter.apply(dom::list_items(*list))),
        };

        if let Some(items) = items {
            out.push(SectionMatch { heading, items });
        }
    }
    out
}

fn sibling_list(
    heading: ElementRef<'_>,
    stop_at: &[&str],
    rule: &SectionRule,
) -> Option<Vec<String>> {
    for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
        if rule.skip_chrome && dom::in_chrome(&sibling) {
            continue;
        }
        if dom::is_named(&sibling, stop_at) {
            return None;
        }
        if dom::is_named(&sibling, LIST_TAGS) {
            let items = rule.filter.apply(dom::list_items(sibling));
            if rule.skip_empty_lists && items.is_empty() {
                continue;
            }
            return Some(items);
        }
    }
    None
}
