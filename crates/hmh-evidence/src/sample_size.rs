//! Sample-size inference from abstract text
//!
//! A heuristic: three patterns tried in priority order, the first match of
//! each considered once. False positives and misses are expected.

use hmh_domain::query::collapse_whitespace;
use regex::Regex;
use std::sync::LazyLock;

/// Largest plausible study size (exclusive)
pub const MAX_SAMPLE_SIZE: u64 = 10_000_000;

const NUMBER: &str = r"([0-9]{1,3}(?:,[0-9]{3})*|[0-9]+)";

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(r"(?i)\bn\s*=\s*{}\b", NUMBER),
        format!(
            r"(?i)\b{}\s+(?:participants|patients|subjects|adults|children)\b",
            NUMBER
        ),
        format!(r"(?i)\b(?:enrolled|included|randomized)\s+{}\b", NUMBER),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("sample-size patterns are literals"))
    .collect()
});

/// Study size mentioned in an abstract, if one can be read
///
/// Recognizes `n = 240`, `1,234 participants` and `enrolled 300`. Numbers
/// outside `1..10_000_000` are ignored.
pub fn infer_sample_size(abstract_text: &str) -> Option<u64> {
    if abstract_text.trim().is_empty() {
        return None;
    }
    let text = collapse_whitespace(abstract_text);

    PATTERNS.iter().find_map(|pattern| {
        let number = pattern.captures(&text)?.get(1)?.as_str().replace(',', "");
        number
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0 && *n < MAX_SAMPLE_SIZE)
    })
}
