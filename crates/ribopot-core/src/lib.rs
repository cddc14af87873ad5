//! # RiboPot Core Library
//!
//! A knowledge-based statistical potential for RNA tertiary structure. Inter-residue
//! distance distributions observed in solved structures are turned into log-odds
//! pseudo-energies, which are then used to score predicted structures.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Residue`, `PairKey`), the
//!   structure parser, the score-table codec, the potential parameters and the pure
//!   potential math (`DistanceHistogram`, log-odds derivation, structure scoring).
//!
//! - **[`engine`]: The Execution Layer.** Error types, progress reporting, and the
//!   parallel fan-out tasks that turn many structure files into histograms or scores.
//!
//! - **[`workflows`]: The Public API.** Complete procedures built on the two layers
//!   below: training a potential from a corpus, evaluating groups of candidate
//!   structures, and sampling interpolated profiles for plotting.

pub mod core;
pub mod engine;
pub mod workflows;
