//! Traits for batch scheduling.

/// Apply a fallible job to every item.
pub trait BatchOps {
    /// Run `job` on each item and collect the results in input order.
    ///
    /// Stops at the first error and returns it. Items already started may
    /// still finish; items not yet started are not run.
    fn try_map<T, U, E, F>(&self, items: &[T], job: F) -> Result<Vec<U>, E>
    where
        T: Sync,
        U: Send,
        E: Send,
        F: Fn(&T) -> Result<U, E> + Sync + Send;
}
