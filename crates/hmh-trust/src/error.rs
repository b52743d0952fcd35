//! Trust filter error types

use thiserror::Error;

/// Errors that can occur while building or configuring the trust filter
#[derive(Error, Debug)]
pub enum TrustError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("Invalid trust config: {0}")]
    Parse(#[from] toml::de::Error),
}
