use crate::executor::core::Shared;
use crate::scheduler::context;
use crate::task::Task;

use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tracing::trace;

/// A worker thread in the pool.
///
/// A `Worker` executes tasks using a work-stealing strategy. Each
/// worker owns the queue at its index and cooperates with its peers to
/// balance load.
///
/// The execution order is:
/// 1. Pop the newest task from the own queue
/// 2. Steal the oldest task from a random peer
/// 3. Park if no work is available
pub(crate) struct Worker {
    /// Index of this worker, which is also its queue index.
    id: usize,

    /// Pool state shared with all workers and producers.
    shared: Arc<Shared>,
}

impl Worker {
    /// Creates a new worker.
    pub(crate) fn new(id: usize, shared: Arc<Shared>) -> Self {
        Self { id, shared }
    }

    /// Runs the worker loop until shutdown.
    ///
    /// The worker registers itself in the thread-local context first,
    /// so jobs it executes route their own submissions back to this
    /// worker's queue.
    ///
    /// The stop flag is observed at the top of each iteration; on
    /// shutdown the worker exits without draining its queue.
    pub(crate) fn run(&self) {
        context::set_current_worker(self.id, self.shared.clone());

        trace!(worker = self.id, "worker started");

        loop {
            if self.shared.stop.load(Ordering::Acquire) {
                break;
            }

            if let Some(task) = self.shared.queues[self.id].try_pop() {
                self.execute(task);
                continue;
            }

            if let Some(task) = self.try_steal() {
                self.execute(task);
                continue;
            }

            self.shared.parker.park(|| {
                self.shared.stop.load(Ordering::Acquire)
                    || self.shared.active.load(Ordering::Acquire) > 0
            });
        }

        trace!(worker = self.id, "worker exiting");
    }

    /// Executes one task and retires it from the active count.
    fn execute(&self, task: Task) {
        task.run();
        self.shared.active.fetch_sub(1, Ordering::AcqRel);
    }

    /// Attempts to steal the oldest task from another worker's queue.
    ///
    /// Victims are scanned round-robin from a uniformly random starting
    /// index, skipping this worker's own queue. Every probe is a
    /// try-lock, so a busy victim is skipped rather than waited on.
    fn try_steal(&self) -> Option<Task> {
        let len = self.shared.queues.len();

        if len <= 1 {
            return None;
        }

        let start = rand::rng().random_range(0..len);

        for i in 0..len {
            let victim = (start + i) % len;

            if victim == self.id {
                continue;
            }

            if let Some(task) = self.shared.queues[victim].try_steal() {
                trace!(worker = self.id, victim, "stole task");
                return Some(task);
            }
        }

        None
    }
}
