//! Configuration for the generation pipeline

use serde::{Deserialize, Serialize};

/// Configuration for the generation pipeline
///
/// The defaults are the canonical thresholds; `strict()` and `lenient()`
/// shift every gate in the obvious direction for callers that want fewer,
/// longer cards or more, shorter ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum paragraph length to keep (characters)
    pub min_paragraph_chars: usize,

    /// Word count at which the sentence buffer is emitted as a chunk
    pub min_chunk_words: usize,

    /// Minimum sentence length eligible for analysis (characters)
    pub min_sentence_chars: usize,

    /// Minimum sentence word count eligible for analysis
    pub min_sentence_words: usize,

    /// Minimum accepted question length (characters)
    pub min_question_chars: usize,

    /// Maximum accepted question length (characters)
    pub max_question_chars: usize,

    /// Length of the context excerpt taken from the answer sentence (characters)
    pub context_prefix_chars: usize,
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_paragraph_chars == 0 {
            return Err("min_paragraph_chars must be greater than 0".to_string());
        }
        if self.min_chunk_words == 0 {
            return Err("min_chunk_words must be greater than 0".to_string());
        }
        if self.min_sentence_chars == 0 {
            return Err("min_sentence_chars must be greater than 0".to_string());
        }
        if self.min_sentence_words == 0 {
            return Err("min_sentence_words must be greater than 0".to_string());
        }
        if self.min_question_chars == 0 {
            return Err("min_question_chars must be greater than 0".to_string());
        }
        if self.max_question_chars <= self.min_question_chars {
            return Err("max_question_chars must exceed min_question_chars".to_string());
        }
        if self.context_prefix_chars == 0 {
            return Err("context_prefix_chars must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    /// Default configuration with the canonical thresholds
    fn default() -> Self {
        Self {
            min_paragraph_chars: 50,
            min_chunk_words: 12,
            min_sentence_chars: 20,
            min_sentence_words: 3,
            min_question_chars: 12,
            max_question_chars: 150,
            context_prefix_chars: 120,
        }
    }
}

impl PipelineConfig {
    /// Strict preset: higher gates, fewer but longer cards
    pub fn strict() -> Self {
        Self {
            min_paragraph_chars: 80,
            min_chunk_words: 20,
            min_sentence_chars: 30,
            min_sentence_words: 5,
            min_question_chars: 15,
            max_question_chars: 120,
            context_prefix_chars: 80,
        }
    }

    /// Lenient preset: lower gates, more cards from thin material
    pub fn lenient() -> Self {
        Self {
            min_paragraph_chars: 30,
            min_chunk_words: 8,
            min_sentence_chars: 12,
            min_sentence_words: 2,
            min_question_chars: 8,
            max_question_chars: 200,
            context_prefix_chars: 200,
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
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_config_is_valid() {
        let config = PipelineConfig::strict();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lenient_config_is_valid() {
        let config = PipelineConfig::lenient();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_question_bounds() {
        let mut config = PipelineConfig::default();
        config.max_question_chars = config.min_question_chars;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_zero_gate() {
        let mut config = PipelineConfig::default();
        config.min_sentence_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PipelineConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = PipelineConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.min_paragraph_chars, parsed.min_paragraph_chars);
        assert_eq!(config.min_chunk_words, parsed.min_chunk_words);
        assert_eq!(config.max_question_chars, parsed.max_question_chars);
    }
}
