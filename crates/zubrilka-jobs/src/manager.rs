//! Job lifecycle: submission, scheduling, cancellation, polling

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::Semaphore;
use tracing::{error, info};
use zubrilka_domain::{
    unix_timestamp, CardStore, DocumentId, Flashcard, JobState, OwnerId, ProcessingStatus,
    SourceDocument, StatusId, StatusSnapshot,
};
use zubrilka_pipeline::PipelineConfig;

use crate::error::store_error;
use crate::{CancelToken, JobError, JobMetrics, JobRunner, JobsConfig, RunOutcome};

/// Parameters of one job submission
#[derive(Debug, Clone, Copy)]
pub struct SubmitRequest {
    /// Document to generate cards from
    pub document_id: DocumentId,

    /// Caller; must own the document
    pub owner_id: OwnerId,

    /// Cards to stop at, within the configured limit
    pub max_cards: u32,
}

/// Owns the shared store and drives card-generation jobs through it
///
/// Submissions return as soon as the attempt is recorded; pipeline work
/// happens on spawned tasks, metered by the concurrency limit. One
/// manager serves any number of concurrent submissions.
pub struct JobManager<S> {
    store: Arc<Mutex<S>>,
    runner: Arc<JobRunner>,
    config: JobsConfig,
    metrics: Arc<JobMetrics>,
    semaphore: Option<Arc<Semaphore>>,
    live: Arc<Mutex<HashMap<StatusId, CancelToken>>>,
}

impl<S> JobManager<S>
where
    S: CardStore + Send + 'static,
    S::Error: fmt::Display,
{
    /// Create a manager over `store` with validated configuration
    pub fn new(
        store: S,
        pipeline: PipelineConfig,
        config: JobsConfig,
    ) -> Result<Self, JobError> {
        pipeline.validate().map_err(JobError::Config)?;
        config.validate().map_err(JobError::Config)?;

        let semaphore = config
            .max_concurrent_jobs
            .map(|slots| Arc::new(Semaphore::new(slots)));
        let runner = Arc::new(JobRunner::new(pipeline, config.write_card_cache));

        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            runner,
            config,
            metrics: Arc::new(JobMetrics::new()),
            semaphore,
            live: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Register an uploaded document for the given owner
    pub fn register_document(
        &self,
        owner_id: OwnerId,
        path: PathBuf,
    ) -> Result<DocumentId, JobError> {
        let document = SourceDocument::new(DocumentId::new(), owner_id, path, unix_timestamp());
        self.lock_store()
            .register_document(document)
            .map_err(store_error)
    }

    /// Submit a generation job, returning its status id immediately
    ///
    /// The document is resolved and the attempt recorded before this
    /// returns; the returned id can be cancelled or polled right away
    /// even if the run has not been scheduled yet.
    pub async fn submit(&self, request: SubmitRequest) -> Result<StatusId, JobError> {
        if request.max_cards == 0 || request.max_cards > self.config.max_cards_limit {
            return Err(JobError::InvalidRequest(format!(
                "max_cards must be between 1 and {}, got {}",
                self.config.max_cards_limit, request.max_cards
            )));
        }

        let document = self.resolve_document(request.document_id, request.owner_id)?;
        if !document.path.exists() {
            return Err(JobError::DocumentNotFound(format!(
                "file missing on disk: {}",
                document.path.display()
            )));
        }

        let status = ProcessingStatus::new(document.id, document.owner_id, unix_timestamp());
        let status_id = self.lock_store().create_status(status).map_err(store_error)?;

        let token = CancelToken::new();
        self.lock_live().insert(status_id, token.clone());
        self.metrics.record_submitted();
        info!("job {} submitted for document {}", status_id, document.id);

        let store = Arc::clone(&self.store);
        let runner = Arc::clone(&self.runner);
        let metrics = Arc::clone(&self.metrics);
        let live = Arc::clone(&self.live);
        let semaphore = self.semaphore.clone();
        let max_cards = request.max_cards;

        tokio::spawn(async move {
            // Submission has already succeeded; the permit only meters
            // when pipeline work may start.
            let _permit = match semaphore {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };

            let run_store = Arc::clone(&store);
            let run_token = token.clone();
            let joined = tokio::task::spawn_blocking(move || {
                runner.run(&run_store, &document, status_id, max_cards, &run_token)
            })
            .await;

            match joined {
                Ok(RunOutcome::Completed { cards }) => metrics.record_completed(cards as u64),
                Ok(RunOutcome::Cancelled { cards }) => metrics.record_cancelled(cards as u64),
                Ok(RunOutcome::Failed) => metrics.record_failed(),
                Err(e) => {
                    // The runner marks its own failures; this branch only
                    // fires when the blocking task itself died.
                    error!("job {} panicked: {}", status_id, e);
                    let update = store
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .update_status(
                            status_id,
                            JobState::Failed,
                            0,
                            Some(format!("job panicked: {}", e)),
                        );
                    if let Err(update) = update {
                        error!("failed to record panic for job {}: {}", status_id, update);
                    }
                    metrics.record_failed();
                }
            }

            live.lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .remove(&status_id);
        });

        Ok(status_id)
    }

    /// Request cancellation of a job
    ///
    /// Sets the persisted flag and flips the in-process token if the job
    /// runs here. Cancelling a job that already reached a terminal state
    /// is accepted and changes nothing.
    pub fn cancel(&self, status_id: StatusId) -> Result<(), JobError> {
        {
            let mut guard = self.lock_store();
            guard
                .read_status(status_id)
                .map_err(store_error)?
                .ok_or_else(|| JobError::StatusNotFound(status_id.to_string()))?;
            guard.set_cancel_requested(status_id).map_err(store_error)?;
        }

        if let Some(token) = self.lock_live().get(&status_id) {
            token.cancel();
        }
        info!("cancellation requested for job {}", status_id);
        Ok(())
    }

    /// Report the progress of a document's most recent attempt
    ///
    /// A document with no attempts on record polls as not started.
    pub fn poll(
        &self,
        document_id: DocumentId,
        owner_id: OwnerId,
    ) -> Result<StatusSnapshot, JobError> {
        self.resolve_document(document_id, owner_id)?;

        let latest = self
            .lock_store()
            .latest_status_for_document(document_id)
            .map_err(store_error)?;

        Ok(match latest {
            Some(status) => StatusSnapshot {
                state: status.state,
                cards_count: status.cards_count,
                created_at: status.created_at,
            },
            None => StatusSnapshot::not_started(),
        })
    }

    /// List the stored cards of a document, newest first
    pub fn list_cards(
        &self,
        document_id: DocumentId,
        owner_id: OwnerId,
    ) -> Result<Vec<Flashcard>, JobError> {
        self.resolve_document(document_id, owner_id)?;
        self.lock_store()
            .list_cards(document_id, owner_id)
            .map_err(store_error)
    }

    /// Counters accumulated by this manager
    pub fn metrics(&self) -> &JobMetrics {
        &self.metrics
    }

    /// Number of jobs submitted here that have not reached a terminal state
    pub fn live_jobs(&self) -> usize {
        self.lock_live().len()
    }

    /// Resolve a document for a caller
    ///
    /// Unknown, deleted, and foreign-owner documents all answer the same
    /// way so callers cannot probe for other owners' documents.
    fn resolve_document(
        &self,
        document_id: DocumentId,
        owner_id: OwnerId,
    ) -> Result<SourceDocument, JobError> {
        let document = self
            .lock_store()
            .get_document(document_id)
            .map_err(store_error)?;

        match document {
            Some(document) if !document.deleted && document.owner_id == owner_id => Ok(document),
            _ => Err(JobError::DocumentNotFound(document_id.to_string())),
        }
    }

    fn lock_store(&self) -> MutexGuard<'_, S> {
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_live(&self) -> MutexGuard<'_, HashMap<StatusId, CancelToken>> {
        self.live
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
