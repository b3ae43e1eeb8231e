use parking_lot::{Condvar, Mutex};
use std::time::Duration;

/// How long a parked worker sleeps before re-scanning on its own.
///
/// The timed wait bounds the cost of any wake-up the heuristics miss:
/// a worker that raced past a notification re-checks the queues within
/// one tick instead of sleeping indefinitely.
const PARK_TIMEOUT: Duration = Duration::from_millis(1);

/// Idle/wake coordination shared by all workers of one pool.
///
/// The parker pairs a condition variable with a count of currently
/// parked workers. Producers notify it on every push; workers park on
/// it only after both their own queue and every steal victim came up
/// empty.
///
/// This lock is never held while a job body executes.
pub(crate) struct Parker {
    /// Number of workers currently parked.
    parked: Mutex<usize>,

    /// Condition variable used to wake parked workers.
    condvar: Condvar,
}

impl Parker {
    /// Creates a parker with no workers parked.
    pub(crate) fn new() -> Self {
        Self {
            parked: Mutex::new(0),
            condvar: Condvar::new(),
        }
    }

    /// Parks the current worker until a wake-up or the timeout.
    ///
    /// `should_wake` is re-evaluated under the parker lock right before
    /// sleeping; a worker never parks while the predicate already
    /// holds. The predicate is advisory (it reads the stop flag and the
    /// active-job counter), so the wait is always timed and the caller
    /// re-scans its queues on every return.
    pub(crate) fn park(&self, should_wake: impl Fn() -> bool) {
        let mut parked = self.parked.lock();

        if should_wake() {
            return;
        }

        *parked += 1;
        self.condvar.wait_for(&mut parked, PARK_TIMEOUT);
        *parked -= 1;
    }

    /// Wakes every parked worker.
    ///
    /// Skips the condvar entirely while nobody is parked, which is the
    /// common case under steady load.
    pub(crate) fn notify_all(&self) {
        if *self.parked.lock() > 0 {
            self.condvar.notify_all();
        }
    }
}
