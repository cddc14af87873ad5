//! # Potential Module
//!
//! The statistical potential itself: distance histograms, the log-odds
//! transformation that turns them into pseudo-energies, and the scoring of single
//! structures.
//!
//! ## Key Components
//!
//! - [`params`] - Shared parameters (representative atom, binning, separation, cap)
//! - [`histogram`] - Chain-local pairwise distance histograms and their aggregation
//! - [`training`] - Derivation of a score table from aggregated counts
//! - [`table`] - The per-pair score table
//! - [`scoring`] - The log-odds formula and the structure [`scoring::Scorer`]
//!
//! ```ignore
//! use ribopot::core::potential::scoring::Scorer;
//!
//! let scorer = Scorer::new(&table, &config);
//! let energy = scorer.score_residues(&residues).total;
//! ```

pub mod histogram;
pub mod params;
pub mod scoring;
pub mod table;
pub mod training;
