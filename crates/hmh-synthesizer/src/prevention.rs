//! Prevention tips mined from guidance snippets

use crate::PipelineConfig;
use hmh_domain::vocabulary::PREVENTION_SENTENCE_KEYWORDS;
use hmh_domain::EvidenceSource;
use std::collections::HashSet;

/// Tips used when nothing better is found
pub const GENERIC_PREVENTION: &[&str] = &[
    "Consult a healthcare provider for specific prevention advice.",
    "Keep a record of your symptoms to identify triggers.",
    "Maintain general hygiene and healthy habits.",
];

/// Split after `.`, `!` or `?` when followed by whitespace
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let Some(&(end, next)) = chars.peek() else {
            break;
        };
        if !next.is_whitespace() {
            continue;
        }
        out.push(&text[start..end]);
        start = text.len();
        while let Some(&(i, w)) = chars.peek() {
            if !w.is_whitespace() {
                start = i;
                break;
            }
            chars.next();
        }
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

fn is_tip(sentence: &str, config: &PipelineConfig) -> bool {
    let len = sentence.chars().count();
    let lower = sentence.to_lowercase();
    PREVENTION_SENTENCE_KEYWORDS.iter().any(|k| lower.contains(k))
        && (config.prevention_min_chars..=config.prevention_max_chars).contains(&len)
        && !sentence.contains('?')
}

/// Prevention sentences from guidance-source snippets, deduplicated in order
///
/// Literature sources are ignored. Empty when no sentence qualifies.
pub fn prevention_from_sources(sources: &[EvidenceSource], config: &PipelineConfig) -> Vec<String> {
    let mut seen = HashSet::new();
    sources
        .iter()
        .filter(|s| s.is_guidance())
        .filter_map(|s| s.snippet.as_deref())
        .flat_map(split_sentences)
        .map(str::trim)
        .filter(|s| is_tip(s, config))
        .filter(|s| seen.insert(s.to_string()))
        .take(config.max_prevention_tips)
        .map(str::to_string)
        .collect()
}

/// Mined tips, or [`GENERIC_PREVENTION`] when there are none
pub fn prevention_tips(sources: &[EvidenceSource], config: &PipelineConfig) -> Vec<String> {
    let tips = prevention_from_sources(sources, config);
    if tips.is_empty() {
        GENERIC_PREVENTION.iter().map(|s| s.to_string()).collect()
    } else {
        tips
    }
}
