//! Question validation before card assembly
//!
//! Every synthesized question passes these gates or produces no card;
//! a rejection is a normal filtering outcome, never an error. Checks
//! run in a fixed order and the first violated gate is reported.

use tracing::debug;

use crate::config::PipelineConfig;
use crate::text::{fold_lower, normalize_question_key, normalize_whitespace, strip_edge_punct};

/// Words a question may open with, compared ё-folded lowercase
///
/// Includes the prepositions the templates open with (`К чему`, `В чём`)
/// alongside the plain interrogative pronouns.
pub const INTERROGATIVES: &[&str] = &[
    "что", "как", "кто", "где", "когда", "почему", "зачем", "какой", "какая", "какое", "какие",
    "какую", "какова", "каковы", "кого", "кому", "чем", "чему", "к", "в", "на", "о", "сколько",
];

/// Why a synthesized question was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// Question is shorter than the configured minimum
    TooShort {
        /// Measured length in characters
        length: usize,
        /// Configured minimum
        min: usize,
    },

    /// Question is longer than the configured maximum
    TooLong {
        /// Measured length in characters
        length: usize,
        /// Configured maximum
        max: usize,
    },

    /// First word is not on the interrogative list
    NotInterrogative {
        /// The offending first word
        first_word: String,
    },

    /// Question is a near-verbatim prefix of its own answer
    EchoesAnswer,
}

/// Validates questions against the configured gates
#[derive(Debug, Clone)]
pub struct QuestionValidator {
    min_question_chars: usize,
    max_question_chars: usize,
}

impl QuestionValidator {
    /// Create a validator with the bounds in `config`
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            min_question_chars: config.min_question_chars,
            max_question_chars: config.max_question_chars,
        }
    }

    /// Check a question against the answer sentence it was built from
    ///
    /// Gates run in order - length bounds, interrogative opening, answer
    /// echo - and the first violation is returned.
    pub fn validate(&self, question: &str, answer: &str) -> Result<(), RejectionReason> {
        let checks = [
            self.check_length(question),
            self.check_interrogative(question),
            self.check_echo(question, answer),
        ];
        match checks.into_iter().flatten().next() {
            Some(reason) => {
                debug!("question rejected ({:?}): {}", reason, question);
                Err(reason)
            }
            None => Ok(()),
        }
    }

    fn check_length(&self, question: &str) -> Option<RejectionReason> {
        let length = question.chars().count();
        if length < self.min_question_chars {
            return Some(RejectionReason::TooShort {
                length,
                min: self.min_question_chars,
            });
        }
        if length > self.max_question_chars {
            return Some(RejectionReason::TooLong {
                length,
                max: self.max_question_chars,
            });
        }
        None
    }

    fn check_interrogative(&self, question: &str) -> Option<RejectionReason> {
        let first_word = question.split_whitespace().next().unwrap_or("");
        let folded = fold_lower(strip_edge_punct(first_word));
        if INTERROGATIVES.contains(&folded.as_str()) {
            None
        } else {
            Some(RejectionReason::NotInterrogative {
                first_word: first_word.to_string(),
            })
        }
    }

    /// A question that merely repeats the opening of its answer teaches
    /// nothing; compare both sides folded and collapsed.
    fn check_echo(&self, question: &str, answer: &str) -> Option<RejectionReason> {
        let question_key = normalize_question_key(question);
        let answer_key = normalize_whitespace(&fold_lower(answer));
        if !question_key.is_empty() && answer_key.starts_with(&question_key) {
            Some(RejectionReason::EchoesAnswer)
        } else {
            None
        }
    }
}
