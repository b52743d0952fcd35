//! Configuration file parsing for the server.
//!
//! One TOML file holds the listener settings, the log filter, the
//! reverse-geocoding endpoint and one optional section per pipeline component.

use hmh_synthesizer::AssistantConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Reverse-geocoding settings for the emergency-number lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodeConfig {
    /// Reverse-geocoding endpoint (Nominatim-style JSON API)
    pub reverse_url: String,

    /// Identifying User-Agent the geocoding service requires
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            reverse_url: "https://nominatim.openstreetmap.org/reverse".to_string(),
            user_agent: "HelpMyHealth/1.0 (contact: demo@example.com)".to_string(),
            timeout_secs: 12,
        }
    }
}

impl GeocodeConfig {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8000)
    pub bind_port: u16,

    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,

    /// Emergency-number lookup
    pub geocode: GeocodeConfig,

    /// Pipeline components (`[locator]`, `[evidence]`, `[extractor]`,
    /// `[trust]`, `[pipeline]`)
    #[serde(flatten)]
    pub assistant: AssistantConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8000,
            log_filter: "info".to_string(),
            geocode: GeocodeConfig::default(),
            assistant: AssistantConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the server settings and every component section
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.is_empty() {
            return Err(ConfigError::Invalid("bind_address must not be empty".to_string()));
        }
        if self.geocode.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "geocode.timeout_secs must be greater than 0".to_string(),
            ));
        }
        self.assistant
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
