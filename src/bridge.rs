//! Adapter for jobs owned by a foreign runtime.
//!
//! A runtime with its own memory management (a scripting VM, a managed
//! language host) cannot hand the scheduler a Rust closure. Instead it
//! provides a raw callback plus an opaque context pointer, typically a
//! pinned handle into its garbage-collected heap, and a release hook
//! the adapter must invoke exactly once when the context is no longer
//! needed.
//!
//! [`ForeignJob`] packages that contract as an owned [`Job`]: the
//! scheduler treats it like any other unit of work and never learns
//! anything about the runtime behind it.

use crate::task::Job;

use std::ffi::c_void;

/// Callback invoked on a worker thread with the submission's context.
pub type ForeignWorkFn = unsafe extern "C" fn(context: *mut c_void);

/// Hook releasing the foreign runtime's handle behind `context`.
pub type ForeignReleaseFn = unsafe extern "C" fn(context: *mut c_void);

/// A job backed by a foreign runtime's callback.
///
/// Executing the job invokes `work(context)` and then `release(context)`
/// exactly once. If the job is dropped without ever executing, which
/// happens to queued jobs when the system shuts down, the release hook
/// still fires exactly once so the foreign handle is not leaked.
pub struct ForeignJob {
    /// The callback representing the job's body.
    work: ForeignWorkFn,

    /// Hook that frees the foreign handle behind `context`.
    release: ForeignReleaseFn,

    /// Opaque token owned by the foreign runtime.
    context: *mut c_void,

    /// Whether `release` has fired. Guards the exactly-once contract
    /// between the execute and drop paths.
    released: bool,
}

// Safety: the context pointer is an opaque token for the foreign
// runtime. The constructor's contract requires it to stay valid and
// usable from any thread until the release hook has run.
unsafe impl Send for ForeignJob {}

impl ForeignJob {
    /// Wraps a foreign callback as a schedulable job.
    ///
    /// # Safety
    ///
    /// - `context` must remain valid until `release` has been invoked
    ///   with it, and must tolerate being used from a worker thread.
    /// - `work` and `release` must not unwind into Rust.
    pub unsafe fn new(
        work: ForeignWorkFn,
        release: ForeignReleaseFn,
        context: *mut c_void,
    ) -> Self {
        Self {
            work,
            release,
            context,
            released: false,
        }
    }

    /// Fires the release hook if it has not fired yet.
    fn release_now(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        // Safety: upheld by the constructor's contract; the released
        // flag guarantees a single invocation.
        unsafe { (self.release)(self.context) };
    }
}

impl Job for ForeignJob {
    fn execute(self: Box<Self>) {
        let mut this = self;

        // Safety: upheld by the constructor's contract.
        unsafe { (this.work)(this.context) };

        this.release_now();
    }
}

impl Drop for ForeignJob {
    /// Releases the foreign handle for jobs that never executed.
    fn drop(&mut self) {
        self.release_now();
    }
}
