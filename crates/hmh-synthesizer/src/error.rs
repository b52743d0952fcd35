//! Error types for the synthesizer

use hmh_evidence::EvidenceError;
use hmh_extractor::ExtractorError;
use hmh_locator::LocatorError;
use hmh_trust::TrustError;
use thiserror::Error;

/// Errors that can occur while assembling the pipeline
///
/// Answering a query never fails once the pipeline is built.
#[derive(Error, Debug)]
pub enum SynthesizerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(String),

    /// Candidate locator could not be built
    #[error("Locator error: {0}")]
    Locator(#[from] LocatorError),

    /// Evidence builder could not be built
    #[error("Evidence error: {0}")]
    Evidence(#[from] EvidenceError),

    /// Extractor could not be built
    #[error("Extractor error: {0}")]
    Extractor(#[from] ExtractorError),

    /// Trust filter could not be built
    #[error("Trust error: {0}")]
    Trust(#[from] TrustError),
}

impl From<toml::de::Error> for SynthesizerError {
    fn from(e: toml::de::Error) -> Self {
        SynthesizerError::TomlParse(e.to_string())
    }
}
