//! Configuration for the job layer

use serde::{Deserialize, Serialize};

fn default_write_card_cache() -> bool {
    true
}

/// Configuration for job submission and scheduling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsConfig {
    /// Largest `max_cards` a submission may request
    pub max_cards_limit: u32,

    /// How many jobs may run pipeline work at once; `None` is unbounded
    ///
    /// Submissions are accepted immediately either way; jobs beyond the
    /// limit wait for a slot before touching the document.
    pub max_concurrent_jobs: Option<usize>,

    /// Write a JSON card cache next to the document after a run persists cards
    #[serde(default = "default_write_card_cache")]
    pub write_card_cache: bool,
}

impl JobsConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_cards_limit == 0 {
            return Err("max_cards_limit must be greater than 0".to_string());
        }
        if self.max_cards_limit > 100 {
            return Err("max_cards_limit cannot exceed 100".to_string());
        }
        if self.max_concurrent_jobs == Some(0) {
            return Err("max_concurrent_jobs cannot be 0; use None for unbounded".to_string());
        }
        Ok(())
    }
}

impl Default for JobsConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_cards_limit: 100,
            max_concurrent_jobs: Some(4),
            write_card_cache: true,
        }
    }
}

impl JobsConfig {
    /// Strict preset: one job at a time, no cache files on disk
    pub fn strict() -> Self {
        Self {
            max_cards_limit: 50,
            max_concurrent_jobs: Some(1),
            write_card_cache: false,
        }
    }

    /// Lenient preset: unbounded concurrency
    pub fn lenient() -> Self {
        Self {
            max_cards_limit: 100,
            max_concurrent_jobs: None,
            write_card_cache: true,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = JobsConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_config_is_valid() {
        let config = JobsConfig::strict();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lenient_config_is_valid() {
        let config = JobsConfig::lenient();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_card_limit_rejected() {
        let mut config = JobsConfig::default();
        config.max_cards_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_card_limit_rejected() {
        let mut config = JobsConfig::default();
        config.max_cards_limit = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = JobsConfig::default();
        config.max_concurrent_jobs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = JobsConfig::strict();
        let toml_str = config.to_toml().unwrap();
        let parsed = JobsConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.max_cards_limit, parsed.max_cards_limit);
        assert_eq!(config.max_concurrent_jobs, parsed.max_concurrent_jobs);
        assert_eq!(config.write_card_cache, parsed.write_card_cache);
    }

    #[test]
    fn test_cache_flag_defaults_when_absent() {
        let parsed =
            JobsConfig::from_toml("max_cards_limit = 10\nmax_concurrent_jobs = 2\n").unwrap();
        assert!(parsed.write_card_cache);
    }
}
