use crate::task::Task;

use parking_lot::Mutex;
use std::collections::VecDeque;

/// A per-worker task queue.
///
/// `WorkerQueue` stores pending tasks for one worker thread. Tasks are
/// pushed and popped at the back of the queue (LIFO), which keeps the
/// most recently submitted work hot in cache, most importantly for jobs
/// that spawn sub-jobs on their own worker.
///
/// Other workers steal from the front of the queue (FIFO), so the
/// oldest work migrates first and nothing starves while a queue stays
/// long. Both consumption paths use `try_lock`, so a stalled queue
/// holder never blocks a thief.
pub(crate) struct WorkerQueue {
    /// Inner deque protected by the queue's own mutex.
    inner: Mutex<VecDeque<Task>>,
}

impl WorkerQueue {
    /// Creates an empty worker queue.
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(VecDeque::new()),
        }
    }

    /// Pushes a task onto the back of the queue.
    ///
    /// Used by producers and by the owning worker alike; this is the
    /// only insertion point.
    pub(crate) fn push(&self, task: Task) {
        self.inner.lock().push_back(task);
    }

    /// Attempts to pop the most recently pushed task.
    ///
    /// This is the owning worker's consumption path. Returns `None`
    /// when the queue is empty or currently locked by another thread;
    /// the caller falls through to stealing rather than waiting.
    pub(crate) fn try_pop(&self) -> Option<Task> {
        self.inner.try_lock()?.pop_back()
    }

    /// Attempts to steal the oldest task in the queue.
    ///
    /// Intended for other workers. Returns `None` when the queue is
    /// empty or the try-lock fails, in which case the thief moves on to
    /// the next victim.
    pub(crate) fn try_steal(&self) -> Option<Task> {
        self.inner.try_lock()?.pop_front()
    }

    /// Drops every pending task.
    ///
    /// Called once during shutdown, after the workers have been joined.
    /// Dropping a task drops its completion sender, so outstanding
    /// handles observe abandonment instead of blocking forever.
    pub(crate) fn clear(&self) {
        self.inner.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_task(order: &Arc<AtomicUsize>, value: usize) -> Task {
        let order = order.clone();
        let (task, _handle) = Task::new(Box::new(move || {
            order.store(value, Ordering::SeqCst);
        }));
        task
    }

    #[test]
    fn test_pop_takes_newest() {
        let queue = WorkerQueue::new();
        let observed = Arc::new(AtomicUsize::new(0));

        queue.push(counting_task(&observed, 1));
        queue.push(counting_task(&observed, 2));

        queue.try_pop().unwrap().run();
        assert_eq!(observed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_steal_takes_oldest() {
        let queue = WorkerQueue::new();
        let observed = Arc::new(AtomicUsize::new(0));

        queue.push(counting_task(&observed, 1));
        queue.push(counting_task(&observed, 2));

        queue.try_steal().unwrap().run();
        assert_eq!(observed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_queue_yields_nothing() {
        let queue = WorkerQueue::new();

        assert!(queue.try_pop().is_none());
        assert!(queue.try_steal().is_none());
    }
}
