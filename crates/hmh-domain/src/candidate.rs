//! Candidate guidance pages

use std::collections::HashSet;

/// A page that might hold guidance for the current query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Human-readable title (link text or a generated label)
    pub title: String,
    /// Absolute URL of the page
    pub url: String,
}

impl Candidate {
    /// Create a new candidate
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Drop candidates whose URL was already seen, keeping first-seen order
///
/// Matching is exact on the URL string: `/x/` and `/x` are distinct entries.
pub fn dedup_candidates(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Candidate> {
        vec![
            Candidate::new("A", "https://www.nhs.uk/conditions/a/"),
            Candidate::new("B", "https://www.nhs.uk/conditions/b/"),
            Candidate::new("A again", "https://www.nhs.uk/conditions/a/"),
            Candidate::new("C", "https://medlineplus.gov/c.html"),
        ]
    }

    #[test]
    fn test_first_occurrence_wins() {
        let out = dedup_candidates(sample());
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].title, "A");
        assert_eq!(out[1].title, "B");
        assert_eq!(out[2].title, "C");
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let once = dedup_candidates(sample());
        let twice = dedup_candidates(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_near_duplicate_urls_are_kept_apart() {
        // Trailing-slash and query-string variants are not unified.
        let out = dedup_candidates(vec![
            Candidate::new("slash", "https://www.nhs.uk/conditions/a/"),
            Candidate::new("no slash", "https://www.nhs.uk/conditions/a"),
            Candidate::new("query", "https://www.nhs.uk/conditions/a/?tab=1"),
        ]);
        assert_eq!(out.len(), 3);
    }
}
