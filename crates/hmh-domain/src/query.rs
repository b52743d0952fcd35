//! Query normalization

use crate::vocabulary::QUERY_SUBSTITUTIONS;

/// A user query and its normalized form
///
/// The normalized text is lower-cased, whitespace-collapsed and has the literal
/// substitutions from [`QUERY_SUBSTITUTIONS`] applied. Both views are fixed at
/// construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw: String,
    normalized: String,
}

impl Query {
    /// Build a query from user input
    ///
    /// Returns `None` when the input is empty after trimming.
    pub fn parse(text: &str) -> Option<Self> {
        let raw = text.trim();
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            normalized: normalize(raw),
        })
    }

    /// The trimmed input as typed by the user
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The normalized text used by the keyword classifiers
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Whether the normalized text contains any of the given phrases
    pub fn mentions_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| self.normalized.contains(p))
    }
}

/// Lower-case, collapse whitespace and apply literal substitutions
pub fn normalize(text: &str) -> String {
    let mut out = collapse_whitespace(&text.to_lowercase());
    for (from, to) in QUERY_SUBSTITUTIONS {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    out
}

/// Collapse every whitespace run into a single space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
