//! Configuration for the guidance pipeline and response synthesis

use crate::SynthesizerError;
use hmh_locator::DEFAULT_USER_AGENT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Page-fetch settings and response-shaping limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Candidate page fetch timeout in seconds
    pub page_timeout_secs: u64,

    /// User-Agent for candidate page fetches
    pub page_user_agent: String,

    /// Characters of the top source's snippet used by the fallback step block
    pub top_source_snippet_chars: usize,

    /// Maximum prevention tips mined from guidance snippets
    pub max_prevention_tips: usize,

    /// Shortest accepted prevention sentence (characters)
    pub prevention_min_chars: usize,

    /// Longest accepted prevention sentence (characters)
    pub prevention_max_chars: usize,

    /// Hex characters of the URL hash used in guidance source ids
    pub source_id_hash_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            page_timeout_secs: 10,
            page_user_agent: DEFAULT_USER_AGENT.to_string(),
            top_source_snippet_chars: 200,
            max_prevention_tips: 5,
            prevention_min_chars: 20,
            prevention_max_chars: 200,
            source_id_hash_chars: 16,
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), SynthesizerError> {
        if self.page_timeout_secs == 0 {
            return Err(SynthesizerError::Config(
                "page_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.max_prevention_tips == 0 {
            return Err(SynthesizerError::Config(
                "max_prevention_tips must be greater than 0".to_string(),
            ));
        }
        if self.prevention_min_chars > self.prevention_max_chars {
            return Err(SynthesizerError::Config(
                "prevention_min_chars cannot exceed prevention_max_chars".to_string(),
            ));
        }
        if !(1..=64).contains(&self.source_id_hash_chars) {
            return Err(SynthesizerError::Config(
                "source_id_hash_chars must be between 1 and 64".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML string; missing keys take defaults
    pub fn from_toml(toml_str: &str) -> Result<Self, SynthesizerError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.page_timeout(), Duration::from_secs(10));
        assert_eq!(config.max_prevention_tips, 5);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = PipelineConfig {
            source_id_hash_chars: 65,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            prevention_min_chars: 300,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = PipelineConfig::from_toml("page_timeout_secs = 3").unwrap();
        assert_eq!(config.page_timeout_secs, 3);
        assert_eq!(config.prevention_max_chars, 200);
        assert!(matches!(
            PipelineConfig::from_toml("page_timeout_secs = 0"),
            Err(SynthesizerError::Config(_))
        ));
    }
}
