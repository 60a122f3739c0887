use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

/// Identifies the failure record of one posted propagator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct FailureRecord(usize);

/// The accumulated failure counts of the propagators of a store.
///
/// A store and all of its clones point to the same records, so a failure in a clone that is
/// discarded afterwards is still visible to the branching heuristics of its ancestors. The
/// records may be shared by clones living on different threads. Every record starts at one so
/// that the weight of a variable is never smaller than its degree.
#[derive(Debug, Default)]
pub(crate) struct SharedFailureCounts {
    counts: Arc<RwLock<Vec<u64>>>,
}

impl SharedFailureCounts {
    /// A handle to the same records.
    pub(crate) fn share(&self) -> SharedFailureCounts {
        SharedFailureCounts {
            counts: Arc::clone(&self.counts),
        }
    }

    pub(crate) fn register(&self) -> FailureRecord {
        let mut counts = self.counts.write().unwrap_or_else(PoisonError::into_inner);
        counts.push(1);
        FailureRecord(counts.len() - 1)
    }

    pub(crate) fn increment(&self, record: FailureRecord) {
        let mut counts = self.counts.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(count) = counts.get_mut(record.0) {
            *count += 1;
        }
    }

    pub(crate) fn get(&self, record: FailureRecord) -> u64 {
        self.counts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(record.0)
            .copied()
            .unwrap_or_default()
    }
}
