use crate::scheduler::JobSystem;

use std::thread;

/// Builder for configuring and creating a [`JobSystem`].
///
/// `JobSystemBuilder` allows customizing the system before
/// constructing it. Currently, it supports configuring the number of
/// worker threads.
///
/// # Examples
///
/// ```rust,ignore
/// let jobs = JobSystemBuilder::new()
///     .worker_threads(4)
///     .build();
/// ```
pub struct JobSystemBuilder {
    /// Requested worker count; `0` means pick automatically.
    worker_threads: usize,
}

impl JobSystemBuilder {
    /// Creates a new `JobSystemBuilder` with default configuration.
    ///
    /// By default the worker count is chosen automatically: one thread
    /// per available logical CPU minus one for the submitting thread,
    /// with a minimum of one worker.
    pub fn new() -> Self {
        Self { worker_threads: 0 }
    }

    /// Sets the number of worker threads.
    ///
    /// Passing `0` keeps the automatic choice described in
    /// [`new`](Self::new).
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let builder = JobSystemBuilder::new()
    ///     .worker_threads(2);
    /// ```
    pub fn worker_threads(mut self, n: usize) -> Self {
        self.worker_threads = n;
        self
    }

    /// Builds the job system with the configured options.
    ///
    /// This is cheap: worker threads are only spawned on the first
    /// submission or an explicit
    /// [`initialize`](JobSystem::initialize).
    pub fn build(self) -> JobSystem {
        let threads = match self.worker_threads {
            0 => default_thread_count(),
            n => n,
        };

        JobSystem::with_thread_count(threads)
    }
}

impl Default for JobSystemBuilder {
    /// Creates a default `JobSystemBuilder`.
    fn default() -> Self {
        Self::new()
    }
}

/// Automatic worker count: available parallelism minus one, at least 1.
fn default_thread_count() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2)
        .saturating_sub(1)
        .max(1)
}
