//! Error types for the record store and the averaging engine.
//!
//! A single `Error` enum covers both collaborators. Per-record parse
//! failures are deliberately NOT represented here: a record whose scores do
//! not parse is a recoverable, local outcome of one worker
//! ([`Outcome::Skipped`]) and never surfaces as an operation failure. Only
//! structural faults (unreadable storage, a poisoned lock, a panicked
//! worker, a mis-sized queue) propagate to the caller.
//!
//! [`Outcome::Skipped`]: crate::Outcome::Skipped

use std::sync::PoisonError;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the record system.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or rewriting the backing record file failed.
    #[error("record file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing record file holds rows the CSV codec cannot decode.
    #[error("record file decode error: {0}")]
    Csv(#[from] csv::Error),

    /// No stored record carries the requested roll number.
    #[error("no record with roll number `{roll_no}`")]
    RecordNotFound { roll_no: String },

    /// The snapshot is larger than the configured queue bound.
    ///
    /// This is a configuration fault, not a per-request one: the queue must
    /// be sized at or above the expected record count.
    #[error("queue capacity {capacity} cannot hold {needed} records; raise the configured capacity")]
    QueueCapacityExceeded { capacity: usize, needed: usize },

    /// A worker thread panicked before draining its share of the queue.
    #[error("average worker {worker_id} panicked")]
    WorkerPanic { worker_id: usize },

    /// A shared lock was poisoned by a panicking thread.
    #[error("shared state lock poisoned")]
    LockPoisoned,
}

// Convert all poisoned lock errors to a simplified `LockPoisoned`
impl<T> From<PoisonError<T>> for Error {
    fn from(_: PoisonError<T>) -> Self {
        Self::LockPoisoned
    }
}
