//! Concurrent average-computation engine.
//!
//! One run of the engine snapshots the record set, loads the snapshot into
//! a bounded [`WorkQueue`], and spawns a fixed pool of worker threads. Each
//! worker repeatedly takes one record (a single locked pop, so every queued
//! record is consumed exactly once), computes the mean of its three scores,
//! and writes the result into the shared [`Aggregator`] under a mutex.
//! Records whose scores do not parse are skipped with a warning. The run
//! returns only after every worker has joined; there is no persistent pool,
//! no cancellation, and no partial result.

mod aggregator;
mod pool;
mod queue;
mod worker;

pub use aggregator::{Aggregator, AverageResult};
pub use pool::{PoolConfig, compute_averages, compute_averages_from};
pub use queue::WorkQueue;
pub use worker::{Outcome, ScoreField, grade};
