use quarry::JobSystemBuilder;
use quarry::bridge::ForeignJob;
use std::ffi::c_void;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

#[test]
fn test_foreign_job_runs_and_releases_its_handle() {
    static OBSERVED: AtomicUsize = AtomicUsize::new(0);
    static RELEASES: AtomicUsize = AtomicUsize::new(0);

    unsafe extern "C" fn work(context: *mut c_void) {
        let value = unsafe { *(context as *const u32) };
        OBSERVED.fetch_add(value as usize, Ordering::SeqCst);
    }

    unsafe extern "C" fn release(context: *mut c_void) {
        drop(unsafe { Box::from_raw(context as *mut u32) });
        RELEASES.fetch_add(1, Ordering::SeqCst);
    }

    let jobs = JobSystemBuilder::new().worker_threads(2).build();

    let context = Box::into_raw(Box::new(7u32)) as *mut c_void;
    let job = unsafe { ForeignJob::new(work, release, context) };

    let handle = jobs.schedule_job(Box::new(job));
    jobs.complete(handle).unwrap();

    assert_eq!(OBSERVED.load(Ordering::SeqCst), 7, "callback saw its context");
    assert_eq!(RELEASES.load(Ordering::SeqCst), 1, "release hook fired exactly once");
}

#[test]
fn test_unscheduled_foreign_job_still_releases() {
    static RELEASES: AtomicUsize = AtomicUsize::new(0);

    unsafe extern "C" fn work(_context: *mut c_void) {}

    unsafe extern "C" fn release(_context: *mut c_void) {
        RELEASES.fetch_add(1, Ordering::SeqCst);
    }

    let job = unsafe { ForeignJob::new(work, release, std::ptr::null_mut()) };
    drop(job);

    assert_eq!(RELEASES.load(Ordering::SeqCst), 1);
}

#[test]
fn test_abandoned_foreign_job_releases_at_shutdown() {
    static RELEASES: AtomicUsize = AtomicUsize::new(0);

    unsafe extern "C" fn work(_context: *mut c_void) {}

    unsafe extern "C" fn release(_context: *mut c_void) {
        RELEASES.fetch_add(1, Ordering::SeqCst);
    }

    let jobs = JobSystemBuilder::new().worker_threads(1).build();

    let started = Arc::new(AtomicBool::new(false));
    let started_clone = started.clone();

    let blocker = jobs.schedule(move || {
        started_clone.store(true, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(100));
    });

    while !started.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(1));
    }

    // Queued behind the busy worker, so it never executes.
    let job = unsafe { ForeignJob::new(work, release, std::ptr::null_mut()) };
    let abandoned = jobs.schedule_job(Box::new(job));

    jobs.shutdown();

    jobs.complete(blocker).unwrap();
    assert!(abandoned.wait().is_err());
    assert_eq!(
        RELEASES.load(Ordering::SeqCst),
        1,
        "clearing the queue must release the foreign handle"
    );
}
