use crate::{Error, Record, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Bounded FIFO queue distributing snapshot records to workers.
///
/// The queue is filled once per engine run and only drained afterwards, so
/// an empty `take` means the run is out of work, not that more is coming.
pub struct WorkQueue {
    capacity: usize,
    items: Mutex<VecDeque<Record>>,
}

impl WorkQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Loads a snapshot into the queue.
    ///
    /// Capacity is a checked precondition: a snapshot that does not fit is
    /// a configuration fault and fails fast here rather than dropping
    /// records on the floor.
    pub fn fill(&self, records: Vec<Record>) -> Result<()> {
        let mut items = self.items.lock()?;
        let needed = items.len() + records.len();
        if needed > self.capacity {
            return Err(Error::QueueCapacityExceeded {
                capacity: self.capacity,
                needed,
            });
        }
        items.extend(records);
        Ok(())
    }

    /// Takes the next record, or `None` once the queue is empty.
    ///
    /// The emptiness check and the pop happen under one lock acquisition,
    /// so two workers can never both observe the same final record.
    pub fn take(&self) -> Result<Option<Record>> {
        Ok(self.items.lock()?.pop_front())
    }
}
