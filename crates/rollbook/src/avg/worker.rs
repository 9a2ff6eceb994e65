use super::{Aggregator, AverageResult, WorkQueue};
use crate::{Record, Result};
use core::fmt;

/// Score field that failed to parse, for skip diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreField {
    English,
    Maths,
    Science,
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::English => "english",
            Self::Maths => "maths",
            Self::Science => "science",
        })
    }
}

/// Per-record result of one worker step.
///
/// A skip is a recoverable, record-local outcome: it carries which field
/// failed and the raw value, and it never aborts the worker or the pool.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// All three scores parsed; the mean, rounded to two decimals.
    Computed(f64),
    /// A score field did not parse as a number; no result entry is written.
    Skipped { field: ScoreField, value: String },
}

/// Parses the three scores of `record` and computes their mean.
///
/// Fields are checked in `english`, `maths`, `science` order; the first
/// unparsable one wins the skip diagnostic. Surrounding whitespace is
/// tolerated.
pub fn grade(record: &Record) -> Outcome {
    match (
        record.english.trim().parse::<f64>(),
        record.maths.trim().parse::<f64>(),
        record.science.trim().parse::<f64>(),
    ) {
        (Ok(english), Ok(maths), Ok(science)) => {
            Outcome::Computed(round2((english + maths + science) / 3.0))
        }
        (Err(_), _, _) => skipped(ScoreField::English, &record.english),
        (_, Err(_), _) => skipped(ScoreField::Maths, &record.maths),
        (_, _, Err(_)) => skipped(ScoreField::Science, &record.science),
    }
}

fn skipped(field: ScoreField, value: &str) -> Outcome {
    Outcome::Skipped {
        field,
        value: value.to_owned(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Default)]
pub(crate) struct WorkerStats {
    pub(crate) computed: usize,
    pub(crate) skipped: usize,
}

/// Drains the queue until it reports empty.
///
/// The queue is never refilled during a run, so an empty take terminates
/// the worker; it never blocks waiting for new records. Each computed
/// result is written into the shared map under the aggregator's lock.
pub(crate) fn worker_loop(
    worker_id: usize,
    queue: &WorkQueue,
    results: &Aggregator,
) -> Result<WorkerStats> {
    let mut stats = WorkerStats::default();
    while let Some(record) = queue.take()? {
        match grade(&record) {
            Outcome::Computed(average) => {
                tracing::debug!(worker_id, roll_no = %record.roll_no, average, "computed average");
                results.insert(record.roll_no, AverageResult { average })?;
                stats.computed += 1;
            }
            Outcome::Skipped { field, value } => {
                tracing::warn!(
                    worker_id,
                    roll_no = %record.roll_no,
                    %field,
                    value = %value,
                    "skipping record with unparsable score"
                );
                stats.skipped += 1;
            }
        }
    }
    Ok(stats)
}
