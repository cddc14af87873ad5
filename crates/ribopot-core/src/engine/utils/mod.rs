//! Utility functions shared by engine tasks and workflows.
//!
//! - [`files`] - Discovery of structure files and candidate-structure groups

pub mod files;
