use crate::executor::core::Shared;

use std::cell::RefCell;
use std::sync::Arc;

thread_local! {
    /// Identity of the worker running on the current thread, if any.
    ///
    /// Installed once per worker thread at startup and consulted by
    /// `schedule` to route jobs submitted from inside a running job
    /// back to the submitting worker's own queue.
    static CURRENT_WORKER: RefCell<Option<(usize, Arc<Shared>)>> =
        const { RefCell::new(None) };
}

/// Registers the current thread as worker `id` of the given pool.
///
/// Called exactly once per worker thread, before its loop starts. The
/// registration lives until the thread exits.
pub(crate) fn set_current_worker(id: usize, shared: Arc<Shared>) {
    CURRENT_WORKER.with(|cell| {
        *cell.borrow_mut() = Some((id, shared));
    });
}

/// Returns the current thread's worker index within the given pool.
///
/// Returns `None` on non-worker threads and on workers belonging to a
/// different pool; the identity check compares the shared state by
/// pointer, so two coexisting systems never cross-route submissions.
pub(crate) fn current_worker_for(shared: &Arc<Shared>) -> Option<usize> {
    CURRENT_WORKER.with(|cell| {
        let borrowed = cell.borrow();
        let (id, own) = borrowed.as_ref()?;

        Arc::ptr_eq(own, shared).then_some(*id)
    })
}
