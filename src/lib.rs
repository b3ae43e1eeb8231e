//! # Quarry
//!
//! **Quarry** is a lightweight work-stealing job system for Rust,
//! designed as the task scheduling layer of a larger engine.
//!
//! Unlike general-purpose thread pools, Quarry focuses on the
//! primitives an engine actually needs from its scheduler: cheap
//! submission of short-lived jobs from any thread, per-worker queues
//! with work stealing, and blocking wait-for-completion tokens.
//!
//! Quarry is built from the ground up with simplicity and performance
//! in mind, offering:
//!
//! - A **work-stealing scheduler** with per-worker queues: local work
//!   runs newest-first for cache locality while idle workers steal
//!   oldest-first from their peers
//! - **Lazy pool creation**: the worker threads are spawned by the
//!   first submission, safely, from any thread
//! - **Completion handles** that block the waiter, never spin, and
//!   surface a job's panic to whoever waits on it
//! - A **foreign-runtime bridge** so managed-language hosts can submit
//!   callback jobs without the scheduler knowing about their heap
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quarry::JobSystem;
//!
//! let jobs = JobSystem::new();
//!
//! let handle = jobs.schedule(|| {
//!     println!("running on a worker thread");
//! });
//!
//! jobs.complete(handle).unwrap();
//! ```
//!
//! A process-wide instance is the embedder's choice, not the crate's:
//!
//! ```rust,ignore
//! use quarry::JobSystem;
//! use std::sync::OnceLock;
//!
//! static JOBS: OnceLock<JobSystem> = OnceLock::new();
//!
//! fn jobs() -> &'static JobSystem {
//!     JOBS.get_or_init(JobSystem::new)
//! }
//! ```
//!
//! ## Modules
//!
//! - [`bridge`] - Adapter for jobs owned by a foreign runtime
//! - [`error`] - Errors surfaced when waiting on a job

mod executor;
mod scheduler;
mod task;
mod work_stealing;

pub mod bridge;
pub mod error;

pub use error::JobError;
pub use scheduler::{JobSystem, JobSystemBuilder};
pub use task::{Job, JobHandle};
