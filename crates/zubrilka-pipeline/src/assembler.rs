//! Card assembly - the per-run accumulation stage
//!
//! One assembler lives for one generation run. Each offered sentence is
//! fed through analyze, synthesize, and validate; survivors are paired
//! with their verbatim sentence, deduplicated on the normalized question
//! key, and counted against the run's card cap. Once the cap is reached
//! the assembler stops looking at sentences entirely.

use std::collections::HashSet;

use tracing::debug;
use zubrilka_domain::Sentence;

use crate::analyzer::Analyzer;
use crate::config::PipelineConfig;
use crate::synthesizer::Synthesizer;
use crate::text::{normalize_question_key, prefix_chars};
use crate::validator::QuestionValidator;

/// A card awaiting persistence: the pipeline's final product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    /// Validated question text
    pub question: String,

    /// Verbatim source sentence
    pub answer: String,

    /// Prefix of the source sentence kept for display context
    pub context: String,

    /// Zero-based page the sentence came from
    pub page_index: usize,
}

/// What happened to one offered sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssembleOutcome {
    /// A card was accepted and capacity remains
    Accepted,

    /// The sentence produced no card: ineligible, no marker matched,
    /// the question was rejected, or it duplicated an earlier one
    Skipped,

    /// The cap is reached; no further sentence will be analyzed
    Saturated,
}

/// Accumulates card drafts for one generation run
pub struct CardAssembler<'a> {
    analyzer: &'a Analyzer,
    synthesizer: &'a Synthesizer,
    validator: &'a QuestionValidator,
    context_prefix_chars: usize,
    max_cards: usize,
    seen: HashSet<String>,
    drafts: Vec<CardDraft>,
}

impl<'a> CardAssembler<'a> {
    /// Create an assembler for one run capped at `max_cards`
    pub fn new(
        analyzer: &'a Analyzer,
        synthesizer: &'a Synthesizer,
        validator: &'a QuestionValidator,
        config: &PipelineConfig,
        max_cards: usize,
    ) -> Self {
        Self {
            analyzer,
            synthesizer,
            validator,
            context_prefix_chars: config.context_prefix_chars,
            max_cards,
            seen: HashSet::new(),
            drafts: Vec::new(),
        }
    }

    /// Offer one sentence to the run
    ///
    /// Returns `Saturated` from the call that fills the cap onward;
    /// once saturated, offered sentences are not analyzed at all.
    pub fn offer(&mut self, sentence: &Sentence, page_index: usize) -> AssembleOutcome {
        if self.is_saturated() {
            return AssembleOutcome::Saturated;
        }

        let triple = match self.analyzer.analyze(sentence) {
            Some(triple) => triple,
            None => return AssembleOutcome::Skipped,
        };
        let question = match self.synthesizer.synthesize(&triple) {
            Some(question) => question,
            None => return AssembleOutcome::Skipped,
        };
        if self.validator.validate(&question, &sentence.text).is_err() {
            return AssembleOutcome::Skipped;
        }

        if !self.seen.insert(normalize_question_key(&question)) {
            debug!("dropping duplicate question: {}", question);
            return AssembleOutcome::Skipped;
        }

        self.drafts.push(CardDraft {
            question,
            answer: sentence.text.clone(),
            context: prefix_chars(&sentence.text, self.context_prefix_chars),
            page_index,
        });

        if self.is_saturated() {
            AssembleOutcome::Saturated
        } else {
            AssembleOutcome::Accepted
        }
    }

    /// Whether the card cap is reached
    pub fn is_saturated(&self) -> bool {
        self.drafts.len() >= self.max_cards
    }

    /// Number of drafts accepted so far
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    /// Whether no draft has been accepted yet
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Consume the assembler, yielding drafts in document order
    pub fn into_drafts(self) -> Vec<CardDraft> {
        self.drafts
    }
}
