use crate::executor::worker::Worker;
use crate::work_stealing::parking::Parker;
use crate::work_stealing::queue::WorkerQueue;

use crossbeam_utils::CachePadded;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use tracing::debug;

/// State shared between the pool, its workers, and submitting threads.
pub(crate) struct Shared {
    /// One queue per worker, indexed by worker id.
    ///
    /// Cache-padded so neighboring queues never share a cache line
    /// under cross-thread push/steal traffic.
    pub(crate) queues: Vec<CachePadded<WorkerQueue>>,

    /// Idle/wake coordination for all workers.
    pub(crate) parker: Parker,

    /// Stop flag observed at the top of every worker loop.
    pub(crate) stop: AtomicBool,

    /// Count of jobs submitted but not yet finished.
    ///
    /// Advisory input to the park predicate only; completion is
    /// signaled through each task's own channel.
    pub(crate) active: AtomicUsize,

    /// Round-robin cursor for submissions from non-worker threads.
    pub(crate) next_queue: AtomicUsize,
}

/// A running pool of worker threads.
///
/// The `Pool` is responsible for:
/// - creating one queue per worker,
/// - spawning the worker threads,
/// - coordinating orderly shutdown and thread joining.
///
/// It is created lazily by the owning [`JobSystem`](crate::JobSystem)
/// and keeps a fixed thread count for its whole lifetime.
pub(crate) struct Pool {
    /// State shared with the workers.
    pub(crate) shared: Arc<Shared>,

    /// Join handles for the worker threads.
    ///
    /// Behind a mutex so `shutdown` works through a shared reference;
    /// draining makes a second join attempt a no-op.
    handles: Mutex<Vec<JoinHandle<()>>>,

    /// Configured worker count.
    threads: usize,
}

impl Pool {
    /// Spawns a pool with the given number of worker threads.
    pub(crate) fn new(threads: usize) -> Self {
        let mut queues = Vec::with_capacity(threads);
        for _ in 0..threads {
            queues.push(CachePadded::new(WorkerQueue::new()));
        }

        let shared = Arc::new(Shared {
            queues,
            parker: Parker::new(),
            stop: AtomicBool::new(false),
            active: AtomicUsize::new(0),
            next_queue: AtomicUsize::new(0),
        });

        debug!(threads, "spawning worker pool");

        let mut handles = Vec::with_capacity(threads);
        for id in 0..threads {
            let shared = shared.clone();

            let handle = thread::Builder::new()
                .name(format!("quarry-worker-{id}"))
                .spawn(move || Worker::new(id, shared).run())
                .expect("failed to spawn worker thread");

            handles.push(handle);
        }

        Self {
            shared,
            handles: Mutex::new(handles),
            threads,
        }
    }

    /// Returns the configured worker count.
    pub(crate) fn thread_count(&self) -> usize {
        self.threads
    }

    /// Stops and joins every worker, then releases queued tasks.
    ///
    /// The first caller flips the stop flag and performs the full
    /// teardown; any later caller observes the flag already set and
    /// returns immediately, so shutdown never double-joins.
    ///
    /// Workers exit without draining their queues. Clearing the queues
    /// afterwards drops the pending tasks, whose handles then resolve
    /// as abandoned.
    pub(crate) fn shutdown(&self) {
        if self.shared.stop.swap(true, Ordering::AcqRel) {
            return;
        }

        self.shared.parker.notify_all();

        let handles: Vec<_> = self.handles.lock().drain(..).collect();
        for handle in handles {
            let _ = handle.join();
        }

        for queue in &self.shared.queues {
            queue.clear();
        }

        debug!(threads = self.threads, "worker pool stopped");
    }
}
