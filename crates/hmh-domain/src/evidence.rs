//! Cited evidence sources

use serde::{Deserialize, Serialize};

/// Reliability grade attached to every evidence source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reliability {
    /// Strong evidence (recent and/or large sample, or trusted guidance)
    High,
    /// Middling evidence
    Moderate,
    /// Weak or unknown evidence
    Low,
}

impl Reliability {
    /// Get the grade name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Reliability::High => "High",
            Reliability::Moderate => "Moderate",
            Reliability::Low => "Low",
        }
    }
}

impl std::str::FromStr for Reliability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Reliability::High),
            "moderate" => Ok(Reliability::Moderate),
            "low" => Ok(Reliability::Low),
            _ => Err(format!("Invalid reliability: {}", s)),
        }
    }
}

/// Where a source came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// Public health guidance from a trusted domain
    #[serde(rename = "Guidance")]
    Guidance,
    /// A literature record
    #[serde(rename = "PubMed study")]
    PubMedStudy,
}

/// The canonical unit of cited evidence
///
/// Built once per source hit and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSource {
    /// Stable identifier (literature id or URL hash based)
    pub id: String,
    /// Title of the page or article
    pub title: String,
    /// Publisher, site or journal name
    pub publisher: String,
    /// Publication year (current year when unknown)
    pub year: i32,
    /// Guidance or literature
    #[serde(rename = "type")]
    pub kind: SourceKind,
    /// Link to the source
    pub url: String,
    /// Reliability grade
    pub reliability: Reliability,
    /// Free text explaining the grade
    pub rationale: String,
    /// Inferred study size, literature only
    pub sample_size: Option<u64>,
    /// Short excerpt
    pub snippet: Option<String>,
}

impl EvidenceSource {
    /// Create a guidance source from a trusted domain
    ///
    /// Guidance from the allow-list is always graded `High`.
    pub fn guidance(
        id: impl Into<String>,
        title: impl Into<String>,
        publisher: impl Into<String>,
        year: i32,
        url: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            publisher: publisher.into(),
            year,
            kind: SourceKind::Guidance,
            url: url.into(),
            reliability: Reliability::High,
            rationale: rationale.into(),
            sample_size: None,
            snippet: None,
        }
    }

    /// Attach a snippet
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    /// Whether this is a guidance source
    pub fn is_guidance(&self) -> bool {
        self.kind == SourceKind::Guidance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reliability_round_trip_names() {
        for r in [Reliability::High, Reliability::Moderate, Reliability::Low] {
            assert_eq!(r.as_str().parse::<Reliability>().unwrap(), r);
        }
        assert!("certain".parse::<Reliability>().is_err());
    }

    #[test]
    fn test_guidance_is_high() {
        let src = EvidenceSource::guidance(
            "nhs-1",
            "Burns and scalds",
            "NHS",
            2026,
            "https://www.nhs.uk/conditions/burns-and-scalds/",
            "NHS Condition Page",
        )
        .with_snippet("Official NHS guidance.");
        assert_eq!(src.reliability, Reliability::High);
        assert!(src.is_guidance());
        assert_eq!(src.snippet.as_deref(), Some("Official NHS guidance."));
    }

    #[test]
    fn test_wire_shape() {
        let src = EvidenceSource::guidance("mp-1", "Burns", "MedlinePlus", 2026, "u", "r");
        let json = serde_json::to_value(&src).unwrap();
        assert_eq!(json["type"], "Guidance");
        assert_eq!(json["reliability"], "High");
        assert!(json["sample_size"].is_null());

        let mut study = src.clone();
        study.kind = SourceKind::PubMedStudy;
        let json = serde_json::to_value(&study).unwrap();
        assert_eq!(json["type"], "PubMed study");
    }
}
