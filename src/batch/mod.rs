//! How roster entries are scheduled.
//!
//! Entries are independent, so the generator hands them to a [`BatchOps`]
//! implementation: serial by default, rayon-backed with the `parallel` feature.

pub mod serial;
pub mod traits;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use traits::BatchOps;

pub use serial::SerialBatchOps;

#[cfg(feature = "parallel")]
pub use parallel::ParallelBatchOps;

/// Backend used when the caller does not pick one.
#[cfg(not(feature = "parallel"))]
pub type DefaultBatchOps = SerialBatchOps;

/// Backend used when the caller does not pick one.
#[cfg(feature = "parallel")]
pub type DefaultBatchOps = ParallelBatchOps;
