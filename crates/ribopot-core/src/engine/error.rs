use crate::core::io::pdb::PdbError;
use crate::core::io::score_table::ScoreTableError;
use crate::core::potential::params::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Failed to read structure '{path}': {source}", path = path.display())]
    StructureRead {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Score table error: {source}")]
    ScoreTable {
        #[from]
        source: ScoreTableError,
    },

    #[error("Failed to list directory '{path}': {source}", path = path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CSV output: {0}")]
    Csv(#[from] csv::Error),
}
