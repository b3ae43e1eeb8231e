//! Error types surfaced to waiters.

use thiserror::Error;

/// Error returned when waiting on a scheduled job.
///
/// Submission itself never fails with an error value; a rejected
/// submission yields an invalid [`JobHandle`](crate::JobHandle) instead.
/// Errors only surface at the observation point, when a waiter blocks
/// on a handle.
#[derive(Debug, Error)]
pub enum JobError {
    /// The job's body panicked while executing on a worker thread.
    ///
    /// The payload's message is captured on the worker and carried to
    /// the waiter. The worker thread itself survives and keeps
    /// executing other jobs.
    #[error("job panicked: {0}")]
    Panicked(String),

    /// The job was still queued when the system shut down and will
    /// never run.
    #[error("job was abandoned before it could run")]
    Abandoned,
}
