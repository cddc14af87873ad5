//! Data models for coarse-grained RNA structures.
//!
//! A structure is reduced to one representative point per nucleotide. Residues carry
//! their [`residue::BaseType`], and pairs of residues are identified by the
//! order-independent [`pair::PairKey`].

pub mod pair;
pub mod residue;
