//! Static keyword table lookup

use crate::LocatorError;
use hmh_domain::vocabulary::{PRIORITY_OVERRIDES, SITE_CONTENT_PATHS};
use hmh_domain::Candidate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

const BUNDLED_TABLE: &str = include_str!("../data/nhs_slugs.toml");

#[derive(Debug, Deserialize)]
struct SlugFile {
    slugs: BTreeMap<String, String>,
}

/// The fixed candidate for the first priority override the query triggers
///
/// When one fires it is the only static candidate: the broad keyword table
/// over-matches on the common words these topics use.
pub fn priority_override(normalized_query: &str) -> Option<Candidate> {
    PRIORITY_OVERRIDES
        .iter()
        .find(|o| o.triggers.iter().any(|t| normalized_query.contains(t)))
        .map(|o| Candidate::new(o.title, o.url))
}

/// Keyword -> site path table, scanned in sorted key order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugTable {
    slugs: BTreeMap<String, String>,
}

impl SlugTable {
    /// The table shipped with the crate
    pub fn bundled() -> Result<Self, LocatorError> {
        Self::from_toml(BUNDLED_TABLE)
    }

    /// Parse a `[slugs]` table
    pub fn from_toml(toml_str: &str) -> Result<Self, LocatorError> {
        let file: SlugFile = toml::from_str(toml_str)?;
        let table = Self { slugs: file.slugs };
        table.validate()?;
        Ok(table)
    }

    /// Read a `[slugs]` table from disk
    pub fn from_path(path: &Path) -> Result<Self, LocatorError> {
        let text = std::fs::read_to_string(path).map_err(|e| LocatorError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&text)
    }

    fn validate(&self) -> Result<(), LocatorError> {
        for (key, path) in &self.slugs {
            if key.trim().is_empty() || key.to_lowercase() != *key {
                return Err(LocatorError::Config(format!(
                    "slug key '{}' must be non-empty and lower-case",
                    key
                )));
            }
            let rooted = format!("/{}/", path.trim_matches('/'));
            if !SITE_CONTENT_PATHS.iter().any(|p| rooted.starts_with(p)) {
                return Err(LocatorError::Config(format!(
                    "slug path '{}' is outside the content sections",
                    path
                )));
            }
        }
        Ok(())
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    /// Whether the table has no keys
    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    /// Every entry whose key appears anywhere in the query
    pub fn matches(&self, normalized_query: &str, origin: &str) -> Vec<Candidate> {
        let origin = origin.trim_end_matches('/');
        self.slugs
            .iter()
            .filter(|(key, _)| normalized_query.contains(key.as_str()))
            .map(|(key, path)| {
                Candidate::new(
                    format!("NHS guidance: {}", key),
                    format!("{}/{}/", origin, path.trim_matches('/')),
                )
            })
            .collect()
    }

    /// Priority override if one fires, else every matching table entry
    pub fn lookup(&self, normalized_query: &str, origin: &str) -> Vec<Candidate> {
        match priority_override(normalized_query) {
            Some(candidate) => vec![candidate],
            None => self.matches(normalized_query, origin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.nhs.uk";

    #[test]
    fn test_bundled_table_loads() {
        let table = SlugTable::bundled().unwrap();
        assert!(table.len() > 50);
    }

    #[test]
    fn test_override_wins_alone() {
        let table = SlugTable::bundled().unwrap();
        // "stress" is also a table key, but the anxiety override short-circuits
        let out = table.lookup("panic attack and stress", ORIGIN);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "NHS help: anxiety, fear and panic");
    }

    #[test]
    fn test_overrides_checked_in_order() {
        let out = priority_override("low mood and a rash").unwrap();
        assert_eq!(out.title, "NHS self-help: cope with depression");

        let out = priority_override("itchy rash on my arm").unwrap();
        assert_eq!(out.url, "https://www.nhs.uk/conditions/hives/");

        assert!(priority_override("sore throat").is_none());
    }

    #[test]
    fn test_substring_matches_in_key_order() {
        let table = SlugTable::bundled().unwrap();
        let out = table.lookup("whooping cough and a sore throat", ORIGIN);
        let titles: Vec<_> = out.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "NHS guidance: cough",
                "NHS guidance: sore throat",
                "NHS guidance: whooping cough",
            ]
        );
        assert_eq!(out[1].url, "https://www.nhs.uk/conditions/sore-throat/");
    }

    #[test]
    fn test_no_match() {
        let table = SlugTable::bundled().unwrap();
        assert!(table.lookup("zzz", ORIGIN).is_empty());
    }

    #[test]
    fn test_custom_table_and_origin() {
        let table = SlugTable::from_toml(
            "[slugs]\n\"nosebleed\" = \"/conditions/nosebleed/\"\n",
        )
        .unwrap();
        let out = table.lookup("i have a nosebleed", "http://127.0.0.1:8080/");
        assert_eq!(out[0].url, "http://127.0.0.1:8080/conditions/nosebleed/");
    }

    #[test]
    fn test_invalid_tables_rejected() {
        assert!(matches!(
            SlugTable::from_toml("[slugs]\n\"Flu\" = \"conditions/flu\"\n"),
            Err(LocatorError::Config(_))
        ));
        assert!(matches!(
            SlugTable::from_toml("[slugs]\n\"flu\" = \"healthy-living/flu\"\n"),
            Err(LocatorError::Config(_))
        ));
        assert!(matches!(
            SlugTable::from_toml("slugs = 3"),
            Err(LocatorError::TomlParse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = SlugTable::from_path(Path::new("/nonexistent/slugs.toml")).unwrap_err();
        assert!(matches!(err, LocatorError::Io { .. }));
    }
}
