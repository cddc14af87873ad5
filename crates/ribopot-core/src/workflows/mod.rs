//! # Workflows Module
//!
//! High-level procedures that tie the [`crate::engine`] and [`crate::core`] layers
//! together. Each workflow resolves its inputs from disk, reports progress, and
//! returns a structured result for the caller to print or persist.
//!
//! - **Training** ([`train`]) - Count distances over a corpus in parallel, derive the
//!   log-odds potential, and write the score table.
//! - **Evaluation** ([`evaluate`]) - Score groups of candidate structures against a
//!   score table and average each group.
//! - **Profiles** ([`profile`]) - Sample interpolated distance/score curves from a
//!   score table for plotting.

pub mod evaluate;
pub mod profile;
pub mod train;
