//! Configuration for the guidance extractor

use crate::ExtractorError;
use hmh_domain::vocabulary::SITE_DOMAIN;
use serde::{Deserialize, Serialize};

/// Caps and item-length bounds for every extraction pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum steps kept from the action-list and heading+paragraph passes
    pub max_steps: usize,

    /// Maximum items kept from each of the Do and Don't lists
    pub max_do_dont_items: usize,

    /// Maximum emergency items
    pub max_emergency_items: usize,

    /// Maximum cause rows / items
    pub max_cause_items: usize,

    /// Maximum prevention items
    pub max_prevention_items: usize,

    /// Shortest accepted step item (characters)
    pub step_min_chars: usize,

    /// Longest accepted step item (characters)
    pub step_max_chars: usize,

    /// Shortest accepted cause item (characters)
    pub cause_min_chars: usize,

    /// Longest accepted cause item (characters)
    pub cause_max_chars: usize,

    /// Domain whose pages may use the heading+paragraph fallback
    pub narrative_site_domain: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_steps: 8,
            max_do_dont_items: 6,
            max_emergency_items: 8,
            max_cause_items: 10,
            max_prevention_items: 6,
            step_min_chars: 3,
            step_max_chars: 220,
            cause_min_chars: 3,
            cause_max_chars: 150,
            narrative_site_domain: SITE_DOMAIN.to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        let caps = [
            ("max_steps", self.max_steps),
            ("max_do_dont_items", self.max_do_dont_items),
            ("max_emergency_items", self.max_emergency_items),
            ("max_cause_items", self.max_cause_items),
            ("max_prevention_items", self.max_prevention_items),
        ];
        if let Some((name, _)) = caps.iter().find(|(_, v)| *v == 0) {
            return Err(ExtractorError::Config(format!(
                "{} must be greater than 0",
                name
            )));
        }
        if self.step_min_chars > self.step_max_chars {
            return Err(ExtractorError::Config(
                "step_min_chars cannot exceed step_max_chars".to_string(),
            ));
        }
        if self.cause_min_chars > self.cause_max_chars {
            return Err(ExtractorError::Config(
                "cause_min_chars cannot exceed cause_max_chars".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML string; missing keys take defaults
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}
