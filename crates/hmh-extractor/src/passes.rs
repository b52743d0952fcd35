//! The individual extraction passes
//!
//! Each pass returns an empty result when nothing matches.

use crate::dom::{self, Page, LIST_TAGS, SECTION_BREAKS};
use crate::rules::{find_sections, HeadingMatcher, ItemFilter, ListLocator, SectionRule};
use crate::ExtractorConfig;
use hmh_domain::classify::looks_like_action_list;
use hmh_domain::query::collapse_whitespace;
use hmh_domain::vocabulary::{
    ACTION_LIST_MIN_ITEMS, CARE_CARD_CLASS, CARE_CARD_MARKERS, CAUSE_HEADINGS,
    CAUSE_TABLE_KEYWORDS, DONT_HEADINGS, DO_HEADINGS, NARRATIVE_SKIP_HEADINGS,
    NEGATIVE_STEP_HEADINGS, POSITIVE_STEP_HEADINGS, PREVENTION_HEADINGS, STRONG_STEP_HEADING,
    URGENT_HEADINGS,
};

const DO_DONT_LEVELS: &[&str] = &["h2", "h3", "h4"];
const EMERGENCY_BREAKS: &[&str] = &["h2", "h3", "div"];

fn do_dont_rule(phrases: &'static [&'static str]) -> SectionRule {
    SectionRule {
        levels: DO_DONT_LEVELS,
        heading: HeadingMatcher::Exact(phrases),
        locator: ListLocator::NextInDocument,
        filter: ItemFilter::NonEmpty,
        skip_empty_lists: false,
        skip_chrome: false,
    }
}

/// Do and Don't lists; a later matching heading replaces an earlier one
pub(crate) fn do_dont(page: &Page, config: &ExtractorConfig) -> (Vec<String>, Vec<String>) {
    let last = |phrases: &'static [&'static str]| {
        let mut items = find_sections(page, &do_dont_rule(phrases))
            .pop()
            .map(|m| m.items)
            .unwrap_or_default();
        items.truncate(config.max_do_dont_items);
        items
    };
    (last(DO_HEADINGS), last(DONT_HEADINGS))
}

/// Weight of a heading for the action-list pass
pub(crate) fn heading_score(heading: &str) -> u32 {
    POSITIVE_STEP_HEADINGS
        .iter()
        .filter(|p| heading.contains(*p))
        .map(|p| if p.contains(STRONG_STEP_HEADING) { 5 } else { 3 })
        .sum()
}

fn is_action_list(items: &[String]) -> bool {
    items.len() >= ACTION_LIST_MIN_ITEMS && looks_like_action_list(items)
}

/// Action steps under the best-scoring self-help heading, else the first
/// action-like list that is not mostly links
pub(crate) fn action_steps(page: &Page, config: &ExtractorConfig) -> Vec<String> {
    let filter = ItemFilter::Length {
        min: config.step_min_chars,
        max: config.step_max_chars,
    };
    let rule = SectionRule {
        levels: SECTION_BREAKS,
        heading: HeadingMatcher::Contains {
            any: POSITIVE_STEP_HEADINGS,
            exclude: NEGATIVE_STEP_HEADINGS,
        },
        locator: ListLocator::FollowingSiblings {
            stop_at: SECTION_BREAKS,
        },
        filter,
        skip_empty_lists: false,
        skip_chrome: false,
    };

    let mut best: Option<(u32, Vec<String>)> = None;
    for section in find_sections(page, &rule) {
        if !is_action_list(&section.items) {
            continue;
        }
        let score = heading_score(&section.heading);
        if best.as_ref().is_none_or(|(top, _)| score > *top) {
            best = Some((score, section.items));
        }
    }

    let mut steps = match best {
        Some((_, items)) => items,
        None => fallback_action_list(page, filter).unwrap_or_default(),
    };
    steps.truncate(config.max_steps);
    steps
}

fn fallback_action_list(page: &Page, filter: ItemFilter) -> Option<Vec<String>> {
    page.elements()
        .into_iter()
        .filter(|e| dom::is_named(e, LIST_TAGS))
        .filter(|list| {
            let links = dom::descendants_named(*list, &["a"]).count();
            let items = dom::descendants_named(*list, &["li"]).count();
            // navigation menus are mostly links
            2 * links < items
        })
        .map(|list| filter.apply(dom::list_items(list)))
        .find(|items| is_action_list(items))
}

/// One step per narrative heading joined to its first paragraph, or the
/// heading alone when no paragraph follows it
pub(crate) fn heading_paragraphs(page: &Page, config: &ExtractorConfig) -> Vec<String> {
    let matcher = HeadingMatcher::AnyExcept(NARRATIVE_SKIP_HEADINGS);
    let elements = page.elements();

    let mut steps = Vec::new();
    for (index, el) in elements.iter().enumerate() {
        if !dom::is_named(el, SECTION_BREAKS) {
            continue;
        }
        let title = collapse_whitespace(&dom::text_of(*el));
        if !matcher.matches(&title.to_lowercase()) {
            continue;
        }

        let description = elements[index + 1..]
            .iter()
            .find(|e| dom::is_named(e, &["p", "ul", "ol"]))
            .filter(|e| dom::is_named(e, &["p"]))
            .map(|p| collapse_whitespace(&dom::text_of(*p)))
            .unwrap_or_default();

        if description.is_empty() {
            steps.push(title);
        } else {
            steps.push(format!("{} — {}", title, description));
        }
        if steps.len() >= config.max_steps {
            break;
        }
    }
    steps
}

/// Urgent-care items from care cards, else from lists under urgent headings
pub(crate) fn emergency(page: &Page, config: &ExtractorConfig) -> Vec<String> {
    let mut out = care_card_items(page);
    if out.is_empty() {
        let rule = SectionRule {
            levels: SECTION_BREAKS,
            heading: HeadingMatcher::Contains {
                any: URGENT_HEADINGS,
                exclude: &[],
            },
            locator: ListLocator::FollowingSiblings {
                stop_at: EMERGENCY_BREAKS,
            },
            filter: ItemFilter::NonEmpty,
            skip_empty_lists: false,
            skip_chrome: true,
        };
        out = find_sections(page, &rule)
            .into_iter()
            .flat_map(|m| m.items)
            .collect();
    }
    out.truncate(config.max_emergency_items);
    out
}

fn care_card_items(page: &Page) -> Vec<String> {
    let mut out = Vec::new();
    for card in page.elements() {
        if dom::in_chrome(&card)
            || !dom::is_named(&card, &["div"])
            || !dom::has_class_fragment(&card, CARE_CARD_CLASS)
        {
            continue;
        }
        let Some(heading) = dom::descendants_named(card, DO_DONT_LEVELS).next() else {
            continue;
        };
        let text = dom::heading_text(heading);
        if CARE_CARD_MARKERS.iter().any(|m| text.contains(m)) {
            out.extend(
                dom::list_items(card)
                    .into_iter()
                    .filter(|item| !item.is_empty()),
            );
        }
    }
    out
}

/// Cause rows from a qualifying table, else the first list under a cause heading
pub(crate) fn causes(page: &Page, config: &ExtractorConfig) -> Vec<String> {
    let mut out = cause_table_rows(page).unwrap_or_else(|| {
        let rule = SectionRule {
            levels: SECTION_BREAKS,
            heading: HeadingMatcher::Contains {
                any: CAUSE_HEADINGS,
                exclude: &[],
            },
            locator: ListLocator::FollowingSiblings {
                stop_at: SECTION_BREAKS,
            },
            filter: ItemFilter::Length {
                min: config.cause_min_chars,
                max: config.cause_max_chars,
            },
            skip_empty_lists: true,
            skip_chrome: true,
        };
        find_sections(page, &rule)
            .into_iter()
            .next()
            .map(|m| m.items)
            .unwrap_or_default()
    });
    out.truncate(config.max_cause_items);
    out
}

fn cause_table_rows(page: &Page) -> Option<Vec<String>> {
    let mentions_cause = |text: &str| CAUSE_TABLE_KEYWORDS.iter().any(|k| text.contains(k));

    for table in page.elements() {
        if dom::in_chrome(&table) || !dom::is_named(&table, &["table"]) {
            continue;
        }
        let header_hit =
            dom::descendants_named(table, &["th"]).any(|th| mentions_cause(&dom::heading_text(th)));
        let caption_hit = dom::descendants_named(table, &["caption"])
            .next()
            .is_some_and(|c| mentions_cause(&dom::heading_text(c)));
        if !header_hit && !caption_hit {
            continue;
        }

        let rows: Vec<String> = dom::descendants_named(table, &["tr"])
            .filter_map(|tr| {
                let cells: Vec<String> = dom::descendants_named(tr, &["td"])
                    .take(2)
                    .map(|td| collapse_whitespace(&dom::text_of(td)))
                    .collect();
                match cells.as_slice() {
                    [first, second] if !first.is_empty() && !second.is_empty() => {
                        Some(format!("{} — {}", first, second))
                    }
                    _ => None,
                }
            })
            .collect();
        if !rows.is_empty() {
            return Some(rows);
        }
    }
    None
}

/// The first list under a prevention heading
pub(crate) fn prevention(page: &Page, config: &ExtractorConfig) -> Vec<String> {
    let rule = SectionRule {
        levels: SECTION_BREAKS,
        heading: HeadingMatcher::Contains {
            any: PREVENTION_HEADINGS,
            exclude: &[],
        },
        locator: ListLocator::FollowingSiblings {
            stop_at: SECTION_BREAKS,
        },
        filter: ItemFilter::NonEmpty,
        skip_empty_lists: false,
        skip_chrome: false,
    };
    let mut out = find_sections(page, &rule)
        .into_iter()
        .next()
        .map(|m| m.items)
        .unwrap_or_default();
    out.truncate(config.max_prevention_items);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_score_weights() {
        assert_eq!(heading_score("things you can do"), 5);
        // both "things you can do" phrases match
        assert_eq!(heading_score("things you can do to help"), 10);
        assert_eq!(heading_score("tips"), 3);
        assert_eq!(heading_score("tips and support"), 9);
        assert_eq!(heading_score("overview"), 0);
    }
}
