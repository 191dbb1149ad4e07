//! Execution of a single card-generation run

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, error, info, warn};
use zubrilka_domain::{
    unix_timestamp, CardId, CardStore, Flashcard, JobState, SourceDocument, StatusId,
};
use zubrilka_extract::DocumentExtractor;
use zubrilka_pipeline::{
    split_sentences, Analyzer, AssembleOutcome, CardAssembler, CardDraft, Chunker, PipelineConfig,
    QuestionValidator, Synthesizer,
};

use crate::error::store_error;
use crate::{CancelToken, JobError};

/// How one run ended
///
/// A run stopped by cancellation stores `completed` like any other
/// finished run; the distinction here feeds metrics and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The run walked the whole document or filled the card cap
    Completed {
        /// Cards persisted
        cards: usize,
    },

    /// The run stopped on a cancellation request, keeping the partial deck
    Cancelled {
        /// Cards persisted before the stop
        cards: usize,
    },

    /// The run aborted on an error and was marked failed
    Failed,
}

/// Executes one generation run from extraction through persistence
///
/// The runner is synchronous and does blocking file and database work;
/// async callers hop to a blocking context before invoking [`run`].
///
/// [`run`]: JobRunner::run
pub struct JobRunner {
    extractor: DocumentExtractor,
    chunker: Chunker,
    analyzer: Analyzer,
    synthesizer: Synthesizer,
    validator: QuestionValidator,
    config: PipelineConfig,
    write_cache: bool,
}

impl JobRunner {
    /// Create a runner with the given pipeline thresholds
    pub fn new(config: PipelineConfig, write_cache: bool) -> Self {
        Self {
            extractor: DocumentExtractor::new(),
            chunker: Chunker::new(&config),
            analyzer: Analyzer::new(&config),
            synthesizer: Synthesizer::new(),
            validator: QuestionValidator::new(&config),
            config,
            write_cache,
        }
    }

    /// Run one generation attempt to its terminal state
    ///
    /// The status record must already exist in `processing`. Whatever
    /// happens inside, the record has reached a terminal state by the
    /// time this returns, except when even the failure write fails;
    /// that is logged and the record stays `processing`.
    pub fn run<S>(
        &self,
        store: &Arc<Mutex<S>>,
        document: &SourceDocument,
        status_id: StatusId,
        max_cards: u32,
        token: &CancelToken,
    ) -> RunOutcome
    where
        S: CardStore,
        S::Error: fmt::Display,
    {
        match self.execute(store, document, status_id, max_cards, token) {
            Ok((cards, false)) => {
                info!("job {} completed with {} cards", status_id, cards);
                RunOutcome::Completed { cards }
            }
            Ok((cards, true)) => {
                info!("job {} cancelled after {} cards", status_id, cards);
                RunOutcome::Cancelled { cards }
            }
            Err(e) => {
                warn!("job {} failed: {}", status_id, e);
                let failure =
                    self.transition(store, status_id, JobState::Failed, 0, Some(e.to_string()));
                if let Err(update) = failure {
                    error!("failed to record failure for job {}: {}", status_id, update);
                }
                RunOutcome::Failed
            }
        }
    }

    /// Extract, generate, persist; returns (cards saved, stopped by cancellation)
    fn execute<S>(
        &self,
        store: &Arc<Mutex<S>>,
        document: &SourceDocument,
        status_id: StatusId,
        max_cards: u32,
        token: &CancelToken,
    ) -> Result<(usize, bool), JobError>
    where
        S: CardStore,
        S::Error: fmt::Display,
    {
        let pages = self.extractor.extract_pages(&document.path);
        debug!(
            "job {}: extracted {} pages from {}",
            status_id,
            pages.len(),
            document.path.display()
        );

        let mut assembler = CardAssembler::new(
            &self.analyzer,
            &self.synthesizer,
            &self.validator,
            &self.config,
            max_cards as usize,
        );

        let mut stopped = false;
        'chunks: for chunk in self.chunker.chunks(&pages) {
            // A cancellation persisted by another process surfaces here;
            // once the token is set there is nothing left to read.
            if !token.is_cancelled() && self.persisted_cancel(store, status_id)? {
                debug!("job {}: picked up persisted cancellation", status_id);
                token.cancel();
            }

            for sentence in split_sentences(&chunk.text) {
                if token.is_cancelled() {
                    stopped = true;
                    break 'chunks;
                }
                if assembler.offer(&sentence, chunk.page_index) == AssembleOutcome::Saturated {
                    break 'chunks;
                }
            }
        }

        let cards = self.build_cards(document, assembler.into_drafts());
        let saved = if cards.is_empty() {
            0
        } else {
            lock_store(store).save_cards(&cards).map_err(store_error)?
        };

        if self.write_cache && !cards.is_empty() {
            zubrilka_store::cache::write_card_cache(&document.path, &cards);
        }

        self.transition(store, status_id, JobState::Completed, saved as u32, None)?;
        Ok((saved, stopped))
    }

    fn persisted_cancel<S>(
        &self,
        store: &Arc<Mutex<S>>,
        status_id: StatusId,
    ) -> Result<bool, JobError>
    where
        S: CardStore,
        S::Error: fmt::Display,
    {
        lock_store(store)
            .cancel_requested(status_id)
            .map_err(store_error)
    }

    fn transition<S>(
        &self,
        store: &Arc<Mutex<S>>,
        status_id: StatusId,
        state: JobState,
        cards_count: u32,
        error: Option<String>,
    ) -> Result<(), JobError>
    where
        S: CardStore,
        S::Error: fmt::Display,
    {
        lock_store(store)
            .update_status(status_id, state, cards_count, error)
            .map_err(store_error)
    }

    /// Materialize drafts as flashcards, stamped as one batch
    fn build_cards(&self, document: &SourceDocument, drafts: Vec<CardDraft>) -> Vec<Flashcard> {
        let created_at = unix_timestamp();
        drafts
            .into_iter()
            .map(|draft| {
                Flashcard::new(
                    CardId::new(),
                    document.id,
                    document.owner_id,
                    draft.question,
                    draft.answer,
                    draft.context,
                    draft.page_index,
                    created_at,
                )
            })
            .collect()
    }
}

/// Lock the shared store, recovering the guard if a holder panicked
fn lock_store<S>(store: &Arc<Mutex<S>>) -> MutexGuard<'_, S> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
