//! Serial implementation of batch scheduling.

use super::traits::BatchOps;

/// One item at a time, in order.
pub struct SerialBatchOps;

impl Default for SerialBatchOps {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialBatchOps {
    pub const fn new() -> Self {
        Self
    }
}

impl BatchOps for SerialBatchOps {
    fn try_map<T, U, E, F>(&self, items: &[T], job: F) -> Result<Vec<U>, E>
    where
        T: Sync,
        U: Send,
        E: Send,
        F: Fn(&T) -> Result<U, E> + Sync + Send,
    {
        items.iter().map(job).collect()
    }
}
