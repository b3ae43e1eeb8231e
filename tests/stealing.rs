use quarry::JobSystemBuilder;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn test_load_is_shared_between_workers() {
    let jobs = JobSystemBuilder::new().worker_threads(2).build();

    let counter = Arc::new(AtomicUsize::new(0));
    let executors = Arc::new(Mutex::new(HashSet::new()));

    let mut handles: Vec<_> = (0..10_000)
        .map(|_| {
            let counter = counter.clone();
            let executors = executors.clone();

            jobs.schedule(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                executors.lock().unwrap().insert(thread::current().id());
            })
        })
        .collect();

    jobs.complete_all(&mut handles).unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 10_000);
    assert_eq!(
        executors.lock().unwrap().len(),
        2,
        "both workers should execute a share of a 10k-job burst"
    );
}

#[test]
fn test_jobs_never_run_on_the_producer() {
    let jobs = JobSystemBuilder::new().worker_threads(2).build();

    let producer = thread::current().id();
    let ran_on_producer = Arc::new(AtomicUsize::new(0));

    let mut handles: Vec<_> = (0..100)
        .map(|_| {
            let ran_on_producer = ran_on_producer.clone();

            jobs.schedule(move || {
                if thread::current().id() == producer {
                    ran_on_producer.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    jobs.complete_all(&mut handles).unwrap();
    assert_eq!(ran_on_producer.load(Ordering::SeqCst), 0);
}

#[test]
fn test_single_worker_drains_everything() {
    let jobs = JobSystemBuilder::new().worker_threads(1).build();

    let counter = Arc::new(AtomicUsize::new(0));

    let mut handles: Vec<_> = (0..1_000)
        .map(|_| {
            let counter = counter.clone();
            jobs.schedule(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    jobs.complete_all(&mut handles).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 1_000);
}
