//! Error types for the candidate locator

use thiserror::Error;

/// Errors that can occur while configuring the locator or querying a source
///
/// Source errors never escape [`crate::CandidateLocator::locate`]: each source
/// logs its failure and contributes nothing.
#[derive(Error, Debug)]
pub enum LocatorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(String),

    /// The keyword table file could not be read
    #[error("Failed to read {path}: {message}")]
    Io {
        /// Path of the table file
        path: String,
        /// Underlying error text
        message: String,
    },

    /// A search source could not be reached
    #[error("{source_name} request failed: {message}")]
    Fetch {
        /// Which search source failed
        source_name: &'static str,
        /// Underlying error text
        message: String,
    },

    /// A search source answered with something unreadable
    #[error("{source_name} response could not be parsed: {message}")]
    Parse {
        /// Which search source failed
        source_name: &'static str,
        /// Underlying error text
        message: String,
    },
}

impl From<toml::de::Error> for LocatorError {
    fn from(e: toml::de::Error) -> Self {
        LocatorError::TomlParse(e.to_string())
    }
}
