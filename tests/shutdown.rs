use quarry::{JobError, JobHandle, JobSystemBuilder};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

#[test]
fn test_shutdown_twice_is_harmless() {
    let jobs = JobSystemBuilder::new().worker_threads(2).build();

    let handle = jobs.schedule(|| {});
    jobs.complete(handle).unwrap();

    jobs.shutdown();
    jobs.shutdown();
}

#[test]
fn test_shutdown_without_initialize_is_a_noop() {
    let jobs = JobSystemBuilder::new().worker_threads(2).build();

    jobs.shutdown();
    assert_eq!(jobs.thread_count(), 0, "no pool should ever be spawned");
}

#[test]
fn test_schedule_after_shutdown_is_rejected() {
    let jobs = JobSystemBuilder::new().worker_threads(2).build();

    let handle = jobs.schedule(|| {});
    jobs.complete(handle).unwrap();

    jobs.shutdown();

    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();

    let rejected = jobs.schedule(move || {
        counter_clone.fetch_add(1, Ordering::SeqCst);
    });

    assert!(!rejected.is_valid());
    jobs.complete(rejected).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn test_invalid_handle_wait_is_a_noop() {
    let handle = JobHandle::invalid();

    assert!(!handle.is_valid());
    assert!(handle.wait().is_ok());
}

#[test]
fn test_pending_jobs_are_abandoned() {
    let jobs = JobSystemBuilder::new().worker_threads(1).build();

    let started = Arc::new(AtomicBool::new(false));
    let started_clone = started.clone();

    let running = jobs.schedule(move || {
        started_clone.store(true, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(100));
    });

    while !started.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(1));
    }

    // The only worker is now mid-job; everything below stays queued.
    let pending: Vec<_> = (0..50).map(|_| jobs.schedule(|| {})).collect();

    jobs.shutdown();

    jobs.complete(running).unwrap();
    for handle in pending {
        assert!(matches!(handle.wait(), Err(JobError::Abandoned)));
    }
}

#[test]
fn test_drop_shuts_the_system_down() {
    let counter = Arc::new(AtomicUsize::new(0));

    {
        let jobs = JobSystemBuilder::new().worker_threads(2).build();

        let counter = counter.clone();
        let handle = jobs.schedule(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        jobs.complete(handle).unwrap();
    }

    assert_eq!(counter.load(Ordering::SeqCst), 1);
}
