//! Cooperative cancellation token shared between a job and its controller

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-process cancellation flag for one running job
///
/// Clones share the flag. Cancellation is one-way: once set, the token
/// stays cancelled for the rest of the run. The persisted
/// `cancel_requested` column carries the same request across processes;
/// the runner folds it into this token at chunk boundaries.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, uncancelled token
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
