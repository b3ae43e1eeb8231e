//! Work-stealing scheduler components.
//!
//! This module implements the core data structures used by the worker
//! pool to distribute jobs across threads using a work-stealing
//! strategy.
//!
//! It consists of:
//! - [`queue`]: per-worker queues combining fast LIFO local execution
//!   with FIFO stealing,
//! - [`parking`]: the shared condition variable that lets idle workers
//!   sleep instead of spinning.
//!
//! This design minimizes contention while maintaining good load
//! balancing across threads.

pub(crate) mod parking;
pub(crate) mod queue;
