//! Input/output for structure files and persisted score tables.
//!
//! Structure files are read through the [`traits::StructureFile`] interface, which
//! reduces an atomic coordinate file to its coarse-grained residues. Score tables are
//! persisted as one plain-text file per base-pair key by [`score_table`].

pub mod pdb;
pub mod score_table;
pub mod traits;
