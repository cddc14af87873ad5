//! Parallel fan-out tasks over collections of structure files.
//!
//! Each task maps a pure per-file function over its inputs and combines the results
//! without shared mutable state. A failure in any file aborts the whole batch.

pub mod corpus_histogram;
pub mod structure_scoring;
