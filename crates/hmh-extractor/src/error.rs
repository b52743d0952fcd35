//! Error types for the guidance extractor

use thiserror::Error;

/// Errors that can occur while configuring the extractor
///
/// Extraction itself never fails: a pass that finds nothing returns an empty
/// list.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

impl From<toml::de::Error> for ExtractorError {
    fn from(e: toml::de::Error) -> Self {
        ExtractorError::TomlParse(e.to_string())
    }
}
