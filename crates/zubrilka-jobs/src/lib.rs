//! Zubrilka Job Orchestration
//!
//! Runs card generation as cancellable background jobs over a shared
//! store.
//!
//! # Overview
//!
//! The job layer is responsible for:
//! - **Submission**: validating a request, recording the attempt, and
//!   returning a pollable status id immediately
//! - **Scheduling**: metering how many runs do pipeline work at once
//! - **Cancellation**: stopping a run mid-document while keeping the
//!   cards it already produced
//! - **Metrics collection**: counting submissions and outcomes
//!
//! # Architecture
//!
//! [`JobManager`] owns the store behind `Arc<Mutex<_>>` and spawns one
//! task per submission; each task hops to a blocking context where
//! [`JobRunner`] walks the document synchronously. Cancellation is
//! cooperative: an in-process [`CancelToken`] is checked before every
//! sentence, and the flag persisted by the store is folded into the
//! token at chunk boundaries so requests from other processes land too.
//!
//! A cancelled run is not a failure: it completes with the partial deck
//! persisted. Only errors mark an attempt failed, and a failed attempt
//! persists no cards at all.
//!
//! # Usage
//!
//! ```no_run
//! use zubrilka_domain::OwnerId;
//! use zubrilka_jobs::{JobManager, JobsConfig, SubmitRequest};
//! use zubrilka_pipeline::PipelineConfig;
//! use zubrilka_store::SqliteStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteStore::new("zubrilka.db")?;
//!     let manager = JobManager::new(store, PipelineConfig::default(), JobsConfig::default())?;
//!
//!     let owner_id = OwnerId::new();
//!     let document_id = manager.register_document(owner_id, "lecture.pdf".into())?;
//!     let status_id = manager
//!         .submit(SubmitRequest {
//!             document_id,
//!             owner_id,
//!             max_cards: 10,
//!         })
//!         .await?;
//!
//!     println!("submitted job {}", status_id);
//!     println!("{:?}", manager.poll(document_id, owner_id)?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod cancel;
mod config;
mod error;
mod manager;
mod metrics;
mod runner;

pub use cancel::CancelToken;
pub use config::JobsConfig;
pub use error::JobError;
pub use manager::{JobManager, SubmitRequest};
pub use metrics::JobMetrics;
pub use runner::{JobRunner, RunOutcome};
