use super::worker::worker_loop;
use super::{Aggregator, AverageResult, WorkQueue};
use crate::{Error, Record, RecordSource, Result};
use std::collections::HashMap;
use std::thread;

/// Sizing of one averaging run.
#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    /// Worker threads spawned per run.
    pub num_workers: usize,
    /// Upper bound on the number of records one run may snapshot.
    pub queue_capacity: usize,
}

/// Snapshots `source` and computes every record's average.
pub fn compute_averages_from<S: RecordSource>(
    config: &PoolConfig,
    source: &S,
) -> Result<HashMap<String, AverageResult>> {
    let snapshot = source.list_all()?;
    compute_averages(config, snapshot)
}

/// Computes the per-record score average over a snapshot.
///
/// Fills a bounded queue from the snapshot, spawns `num_workers` threads
/// that drain it into a shared result map, and joins them all before
/// returning; there are no partial results. The map holds one entry per
/// record whose scores parsed; skipped records are absent, not null.
/// Contents are invariant to worker count; only the (irrelevant) insertion
/// order varies.
pub fn compute_averages(
    config: &PoolConfig,
    records: Vec<Record>,
) -> Result<HashMap<String, AverageResult>> {
    if records.is_empty() {
        return Ok(HashMap::new());
    }

    let queue = WorkQueue::new(config.queue_capacity);
    queue.fill(records)?;
    let aggregator = Aggregator::default();

    // A zero worker count would return an empty map without draining the
    // queue; one worker is the floor.
    let num_workers = config.num_workers.max(1);

    thread::scope(|scope| {
        let queue = &queue;
        let aggregator = &aggregator;
        let handles: Vec<_> = (0..num_workers)
            .map(|worker_id| scope.spawn(move || worker_loop(worker_id, queue, aggregator)))
            .collect();

        // Join every worker before reporting any failure, so a second
        // panicking worker cannot escape the scope unjoined.
        let joined: Vec<_> = handles
            .into_iter()
            .enumerate()
            .map(|(worker_id, handle)| (worker_id, handle.join()))
            .collect();

        for (worker_id, outcome) in joined {
            match outcome {
                Ok(stats) => {
                    let stats = stats?;
                    tracing::debug!(
                        worker_id,
                        computed = stats.computed,
                        skipped = stats.skipped,
                        "worker drained"
                    );
                }
                Err(_) => return Err(Error::WorkerPanic { worker_id }),
            }
        }
        Ok(())
    })?;

    aggregator.into_results()
}
