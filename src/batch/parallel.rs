//! Parallel implementation of batch scheduling.

use super::traits::BatchOps;
use rayon::prelude::*;

/// Items spread across the global rayon pool.
pub struct ParallelBatchOps;

impl Default for ParallelBatchOps {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelBatchOps {
    pub const fn new() -> Self {
        Self
    }
}

impl BatchOps for ParallelBatchOps {
    fn try_map<T, U, E, F>(&self, items: &[T], job: F) -> Result<Vec<U>, E>
    where
        T: Sync,
        U: Send,
        E: Send,
        F: Fn(&T) -> Result<U, E> + Sync + Send,
    {
        // collecting into Result short-circuits: no new items start after an error
        items.par_iter().map(job).collect()
    }
}
