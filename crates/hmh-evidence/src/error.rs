//! Error types for the evidence builder

use thiserror::Error;

/// Errors that can occur while configuring the builder or calling the
/// literature API
#[derive(Error, Debug)]
pub enum EvidenceError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(String),

    /// The literature API could not be reached
    #[error("Literature {stage} request failed: {message}")]
    Fetch {
        /// `search` or `fetch`
        stage: &'static str,
        /// Underlying error text
        message: String,
    },

    /// The literature API answered with something unreadable
    #[error("Literature {stage} response could not be parsed: {message}")]
    Parse {
        /// `search` or `fetch`
        stage: &'static str,
        /// Underlying error text
        message: String,
    },
}

impl From<toml::de::Error> for EvidenceError {
    fn from(e: toml::de::Error) -> Self {
        EvidenceError::TomlParse(e.to_string())
    }
}
