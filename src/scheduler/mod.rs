//! The job system façade.
//!
//! This module contains the public entry points of the crate:
//! - [`core`]: the [`JobSystem`] itself, owning the lazily created
//!   worker pool and the submission/completion surface,
//! - [`builder`]: configuration via [`JobSystemBuilder`],
//! - [`context`]: thread-local worker identity used to route
//!   submissions made from inside a running job.

pub(crate) mod builder;
pub(crate) mod context;
pub(crate) mod core;

pub use self::builder::JobSystemBuilder;
pub use self::core::JobSystem;
