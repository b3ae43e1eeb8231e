use crate::error::JobError;
use crate::task::core::Outcome;

use std::sync::mpsc::Receiver;

/// A single-use completion token for a scheduled job.
///
/// A `JobHandle` is returned by
/// [`JobSystem::schedule`](crate::JobSystem::schedule) and resolves once
/// the job has finished executing. It is move-only and observed at most
/// once: [`wait`](Self::wait) consumes the handle.
///
/// Dropping a `JobHandle` does **not** cancel the job; it only discards
/// the ability to observe its completion.
pub struct JobHandle {
    /// Reader half of the completion channel.
    ///
    /// `None` marks an invalid handle, as returned for rejected
    /// submissions.
    completion: Option<Receiver<Outcome>>,
}

impl JobHandle {
    /// Wraps the reader half of a task's completion channel.
    pub(crate) fn new(receiver: Receiver<Outcome>) -> Self {
        Self {
            completion: Some(receiver),
        }
    }

    /// Creates a handle that corresponds to no job.
    ///
    /// This is what a rejected submission returns. Waiting on an
    /// invalid handle is a no-op.
    pub fn invalid() -> Self {
        Self { completion: None }
    }

    /// Returns whether this handle tracks an actual job.
    ///
    /// Callers should check this after scheduling against a system that
    /// may have been shut down.
    pub fn is_valid(&self) -> bool {
        self.completion.is_some()
    }

    /// Blocks until the job has finished executing.
    ///
    /// Returns immediately if the job already completed, and is a no-op
    /// `Ok(())` on an invalid handle.
    ///
    /// # Errors
    ///
    /// - [`JobError::Panicked`] if the job's body panicked; the system
    ///   remains usable.
    /// - [`JobError::Abandoned`] if the system shut down before the job
    ///   ran. This resolves instead of blocking forever.
    pub fn wait(self) -> Result<(), JobError> {
        let Some(receiver) = self.completion else {
            return Ok(());
        };

        match receiver.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(message)) => Err(JobError::Panicked(message)),
            Err(_) => Err(JobError::Abandoned),
        }
    }
}
