//! Thread-safe collection of similarity results for one run.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::SimilarityResult;

/// Append-only result list behind a single lock. Clones share the same list.
#[derive(Clone, Default)]
pub struct ResultAggregator {
    results: Arc<Mutex<Vec<SimilarityResult>>>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SimilarityResult>> {
        self.results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, result: SimilarityResult) {
        self.lock().push(result);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the results ordered by descending score. The sort is stable, so equal scores keep
    /// insertion order.
    pub fn sorted_snapshot(&self) -> Vec<SimilarityResult> {
        let mut snapshot = self.lock().clone();
        snapshot.sort_by(|a, b| b.score.total_cmp(&a.score));
        snapshot
    }
}
