use crate::error::JobError;
use crate::executor::core::Pool;
use crate::scheduler::JobSystemBuilder;
use crate::scheduler::context;
use crate::task::{Job, JobHandle, Task};

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::debug;

/// A work-stealing job system.
///
/// The `JobSystem` is responsible for:
/// - lazily creating its worker pool on first use,
/// - accepting job submissions from any thread,
/// - routing each job to a per-worker queue,
/// - providing blocking wait-for-completion operations.
///
/// A `JobSystem` is an ordinary value: construct one and pass it by
/// reference to the systems that submit work. Embedders that want a
/// process-wide instance store it in a `static OnceLock` themselves;
/// nothing in the type assumes there is exactly one.
///
/// Dropping the system shuts it down, joining every worker thread.
pub struct JobSystem {
    /// Worker count the pool will be created with.
    worker_threads: usize,

    /// The pool, created on first use.
    ///
    /// `OnceLock` makes initialization thread-safe and exactly-once
    /// without any re-entrant locking, no matter how many threads race
    /// on their first submission.
    pool: OnceLock<Pool>,

    /// Set once by [`shutdown`](Self::shutdown); submissions observed
    /// after this are rejected.
    stopped: AtomicBool,
}

impl JobSystem {
    /// Creates a job system with the default worker count.
    ///
    /// Equivalent to `JobSystemBuilder::new().build()`. No threads are
    /// spawned until the first submission.
    pub fn new() -> Self {
        JobSystemBuilder::new().build()
    }

    /// Creates a system that will run `worker_threads` workers.
    ///
    /// Callers go through [`JobSystemBuilder`], which resolves the
    /// automatic count before calling this.
    pub(crate) fn with_thread_count(worker_threads: usize) -> Self {
        Self {
            worker_threads,
            pool: OnceLock::new(),
            stopped: AtomicBool::new(false),
        }
    }

    /// Spawns the worker pool now instead of on first submission.
    ///
    /// No-op if the pool already exists or the system has been shut
    /// down. Safe to call from any number of threads concurrently.
    pub fn initialize(&self) {
        if self.stopped.load(Ordering::SeqCst) {
            return;
        }

        self.pool_ref();
    }

    /// Schedules a closure for execution on the worker pool.
    ///
    /// Returns immediately with a handle that resolves once the
    /// closure has run. See [`schedule_job`](Self::schedule_job) for
    /// the routing and rejection rules.
    pub fn schedule<F>(&self, f: F) -> JobHandle
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule_job(Box::new(f))
    }

    /// Schedules a boxed job for execution on the worker pool.
    ///
    /// The first submission creates the worker pool. Jobs submitted
    /// from inside a running job go to the submitting worker's own
    /// queue; jobs from any other thread are spread round-robin across
    /// all queues. Either way every parked worker is notified and the
    /// handle is returned without blocking.
    ///
    /// After [`shutdown`](Self::shutdown) the system is inert and
    /// submissions return [`JobHandle::invalid`]; check
    /// [`JobHandle::is_valid`] when shutdown may race with producers.
    pub fn schedule_job(&self, job: Box<dyn Job>) -> JobHandle {
        if self.stopped.load(Ordering::SeqCst) {
            return JobHandle::invalid();
        }

        let pool = self.pool_ref();

        if self.stopped.load(Ordering::SeqCst) {
            return JobHandle::invalid();
        }

        let (task, handle) = Task::new(job);
        let shared = &pool.shared;

        shared.active.fetch_add(1, Ordering::AcqRel);

        let index = match context::current_worker_for(shared) {
            Some(worker) => worker,
            None => next_round_robin(&shared.next_queue, shared.queues.len()),
        };

        shared.queues[index].push(task);
        shared.parker.notify_all();

        handle
    }

    /// Blocks until the job behind `handle` has finished.
    ///
    /// No-op `Ok(())` on an invalid handle. A job that panicked
    /// surfaces here as [`JobError::Panicked`]; one abandoned by
    /// shutdown as [`JobError::Abandoned`].
    ///
    /// Waiting is a genuine blocking operation, not a spin. A job that
    /// waits on another job occupies its worker while doing so, which
    /// on a single-worker system can deadlock; give nested waits at
    /// least two workers.
    pub fn complete(&self, handle: JobHandle) -> Result<(), JobError> {
        handle.wait()
    }

    /// Waits on every handle in the vector, in order, draining it.
    ///
    /// All handles are waited on even if some fail; the first error
    /// encountered is returned after the last wait finishes.
    pub fn complete_all(&self, handles: &mut Vec<JobHandle>) -> Result<(), JobError> {
        let mut first_error = None;

        for handle in handles.drain(..) {
            if let Err(error) = handle.wait() {
                first_error.get_or_insert(error);
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Returns the worker count, or 0 before the pool exists.
    pub fn thread_count(&self) -> usize {
        self.pool.get().map(Pool::thread_count).unwrap_or(0)
    }

    /// Shuts the system down, joining every worker thread.
    ///
    /// The first call stops the pool; later calls observe the system
    /// already stopped and return immediately. Calling this on a system
    /// that never spawned its pool is a no-op. After shutdown the
    /// system stays inert; build a new `JobSystem` for a fresh pool.
    ///
    /// Jobs still queued when shutdown runs are dropped un-executed;
    /// their handles resolve as [`JobError::Abandoned`]. Shut down only
    /// after completing the work you care about, and never from inside
    /// a job: a worker cannot join itself.
    pub fn shutdown(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Some(pool) = self.pool.get() {
            debug!("shutting down job system");
            pool.shutdown();
        }
    }

    /// Returns the pool, creating it on first use.
    ///
    /// A shutdown that runs while the pool is still being created sees
    /// no pool to stop, so the creating thread re-checks the stopped
    /// flag and tears its own pool down. The creator is never a worker
    /// (workers only exist once creation finished), so this join is
    /// safe.
    fn pool_ref(&self) -> &Pool {
        let mut created = false;

        let pool = self.pool.get_or_init(|| {
            created = true;
            Pool::new(self.worker_threads)
        });

        if created && self.stopped.load(Ordering::SeqCst) {
            pool.shutdown();
        }

        pool
    }
}

impl Default for JobSystem {
    /// Creates a job system with the default worker count.
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for JobSystem {
    /// Shuts the system down if the owner has not already done so.
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Advances the round-robin cursor and returns the next queue index.
fn next_round_robin(cursor: &AtomicUsize, queues: usize) -> usize {
    cursor.fetch_add(1, Ordering::Relaxed) % queues
}
