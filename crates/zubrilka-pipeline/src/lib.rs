//! Zubrilka Generation Pipeline
//!
//! Deterministic, heuristic generation of study flashcards from extracted
//! document text. No machine learning: a fixed table of Russian verb
//! markers drives both sentence analysis and question synthesis.
//!
//! # Architecture
//!
//! ```text
//! PageText → Chunker → sentences → Analyzer → Synthesizer → Validator → CardAssembler
//! ```
//!
//! # Key Features
//!
//! - **Chunking**: blank-line paragraphs filtered for length and
//!   boilerplate, sentences accumulated into word-count-bounded chunks,
//!   delivered as a lazy, restartable stream
//! - **Analysis**: per-sentence verb/subject/object triples from an
//!   ordered stem table and a stop-word scan
//! - **Synthesis**: per-rule question templates with a generic fallback,
//!   post-processed and validated before acceptance
//! - **Assembly**: question-level deduplication and a hard per-run card
//!   cap that stops all further analysis
//!
//! Every step is pure and synchronous; cancellation and persistence live
//! in the job layer.

#![warn(missing_docs)]

mod analyzer;
mod assembler;
mod chunker;
mod config;
mod rules;
mod synthesizer;
mod text;
mod validator;

mod tests;

pub use analyzer::{Analyzer, SentenceTriple, STOP_WORDS};
pub use assembler::{AssembleOutcome, CardAssembler, CardDraft};
pub use chunker::{split_paragraphs, split_sentences, ChunkStream, Chunker};
pub use config::PipelineConfig;
pub use rules::{match_rule, VerbRule, GENERIC_TEMPLATE, VERB_RULES};
pub use synthesizer::Synthesizer;
pub use text::{fold_lower, normalize_question_key, normalize_whitespace};
pub use validator::{QuestionValidator, RejectionReason, INTERROGATIVES};
