//! # Core Module
//!
//! Fundamental building blocks of the statistical potential.
//!
//! - **Residue Representation** ([`models`]) - Base types, coarse-grained residues, and
//!   canonical base-pair keys
//! - **File I/O** ([`io`]) - Reading structure files and reading/writing score tables
//! - **Potential Math** ([`potential`]) - Distance histograms, log-odds scores, and
//!   structure scoring

pub mod io;
pub mod models;
pub mod potential;
