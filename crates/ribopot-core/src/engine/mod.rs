//! # Engine Module
//!
//! The execution layer between the stateless [`crate::core`] and the user-facing
//! [`crate::workflows`].
//!
//! - [`error`] - The error type shared by all engine tasks and workflows
//! - [`progress`] - Callback-based progress reporting, safe to call from worker threads
//! - [`tasks`] - Parallel fan-out over structure files (histogram counting, scoring)
//! - [`utils`] - Discovery of structure files and candidate groups on disk
//!
//! Tasks are pure with respect to their inputs: each worker reads one structure file
//! and returns its result, and results are combined with an order-independent
//! reduction once all workers are done. With the `parallel` feature disabled the same
//! tasks run sequentially.

pub mod error;
pub mod progress;
pub mod tasks;
pub mod utils;
