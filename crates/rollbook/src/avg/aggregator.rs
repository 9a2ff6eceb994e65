use crate::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;

/// Computed average for one record, keyed by roll number in the result map.
///
/// Serializes as `{"average": 70.0}`; the full result map as
/// `{"R1": {"average": 70.0}, ...}`. Results are derived per run and never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AverageResult {
    pub average: f64,
}

/// Shared result map written by all workers of one run.
///
/// The pool coordinator owns the aggregator and hands workers a shared
/// reference only: workers get write access, never ownership. Every write
/// takes the mutex, so concurrent writes to distinct keys cannot corrupt
/// the map; within one run each key is written at most once because the
/// queue hands every record to exactly one worker.
#[derive(Debug, Default)]
pub struct Aggregator {
    results: Mutex<HashMap<String, AverageResult>>,
}

impl Aggregator {
    pub fn insert(&self, roll_no: String, result: AverageResult) -> Result<()> {
        self.results.lock()?.insert(roll_no, result);
        Ok(())
    }

    /// Consumes the aggregator once all workers have joined.
    pub fn into_results(self) -> Result<HashMap<String, AverageResult>> {
        Ok(self.results.into_inner()?)
    }
}
