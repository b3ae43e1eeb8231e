use crate::task::JobHandle;

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::mpsc::{self, Sender};

/// Outcome of one executed job, as carried by the completion channel.
///
/// A captured panic travels as its rendered message rather than the raw
/// payload, so the waiter side stays `Send` friendly and printable.
pub(crate) type Outcome = Result<(), String>;

/// A single-shot unit of work executable by the scheduler.
///
/// `Job` is the capability handed to the system at submission time. The
/// job's storage moves into the scheduler with the box; it is consumed
/// by execution and never invoked twice.
///
/// Any `FnOnce() + Send` closure is a `Job`, so most call sites just
/// pass a closure to [`JobSystem::schedule`](crate::JobSystem::schedule).
/// Implementing the trait directly is only needed for jobs that carry
/// non-closure state, such as the foreign-runtime adapter in
/// [`bridge`](crate::bridge).
pub trait Job: Send {
    /// Runs the job, consuming it.
    fn execute(self: Box<Self>);
}

impl<F: FnOnce() + Send> Job for F {
    fn execute(self: Box<Self>) {
        (*self)()
    }
}

/// A scheduled unit of work owned by exactly one queue slot.
///
/// A `Task` pairs the boxed job with the writer half of its one-shot
/// completion channel. Tasks are created only inside
/// [`JobSystem::schedule`](crate::JobSystem::schedule) and are moved,
/// never copied, from the submitting thread into a worker queue and
/// from there into the worker that executes them.
pub(crate) struct Task {
    /// The job body. Consumed by [`run`](Self::run).
    job: Box<dyn Job>,

    /// Writer half of the completion channel.
    ///
    /// Consumed by the single `send` in [`run`](Self::run), so the
    /// channel is structurally signaled at most once. Dropping an
    /// unexecuted task drops the sender, which the matching
    /// [`JobHandle`] observes as abandonment.
    completion: Sender<Outcome>,
}

impl Task {
    /// Wraps a job and produces the handle for its waiter.
    pub(crate) fn new(job: Box<dyn Job>) -> (Self, JobHandle) {
        let (completion, receiver) = mpsc::channel();

        let task = Self { job, completion };

        (task, JobHandle::new(receiver))
    }

    /// Executes the job body and fulfills the completion channel.
    ///
    /// The body runs under `catch_unwind`: a panicking job signals its
    /// waiter with the captured message instead of taking the worker
    /// thread down. The send result is ignored because the waiter may
    /// have dropped its handle without waiting, which is allowed.
    pub(crate) fn run(self) {
        let Self { job, completion } = self;

        let outcome = catch_unwind(AssertUnwindSafe(|| job.execute()))
            .map_err(|payload| panic_message(payload.as_ref()));

        let _ = completion.send(outcome);
    }
}

/// Renders a panic payload into a message for the waiter.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "job panicked".to_string()
    }
}
