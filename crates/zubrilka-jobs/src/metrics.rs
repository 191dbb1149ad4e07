//! Metrics collection for job execution

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters accumulated across job runs
///
/// Updated from spawned job bodies, so everything is atomic. A cancelled
/// run counts only as cancelled, never also as completed, even though its
/// stored terminal state is `completed`.
#[derive(Debug, Default)]
pub struct JobMetrics {
    submitted: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
    cancelled: AtomicU64,
    cards_generated: AtomicU64,
}

impl JobMetrics {
    /// Create zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted submission
    pub fn record_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a run that finished normally with `cards` persisted
    pub fn record_completed(&self, cards: u64) {
        self.completed.fetch_add(1, Ordering::Relaxed);
        self.cards_generated.fetch_add(cards, Ordering::Relaxed);
    }

    /// Record a run that failed
    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a run stopped by cancellation with `cards` persisted
    pub fn record_cancelled(&self, cards: u64) {
        self.cancelled.fetch_add(1, Ordering::Relaxed);
        self.cards_generated.fetch_add(cards, Ordering::Relaxed);
    }

    /// Total accepted submissions
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    /// Total runs that finished normally
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    /// Total runs that failed
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Total runs stopped by cancellation
    pub fn cancelled(&self) -> u64 {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Total cards persisted across all runs
    pub fn cards_generated(&self) -> u64 {
        self.cards_generated.load(Ordering::Relaxed)
    }

    /// Total runs that have reached a terminal state
    pub fn finished(&self) -> u64 {
        self.completed() + self.failed() + self.cancelled()
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.submitted.store(0, Ordering::Relaxed);
        self.completed.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.cancelled.store(0, Ordering::Relaxed);
        self.cards_generated.store(0, Ordering::Relaxed);
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let lines = vec![
            format!("Job Metrics Summary"),
            format!("==================="),
            format!("Submitted: {}", self.submitted()),
            format!("Completed: {}", self.completed()),
            format!("Failed: {}", self.failed()),
            format!("Cancelled: {}", self.cancelled()),
            format!("Cards generated: {}", self.cards_generated()),
        ];

        lines.join("\n")
    }
}
