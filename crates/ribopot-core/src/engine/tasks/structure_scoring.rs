use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::StructureFile;
use crate::core::potential::params::PotentialConfig;
use crate::core::potential::scoring::{Scorer, StructureScore};
use crate::core::potential::table::ScoreTable;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredStructure {
    pub path: PathBuf,
    pub score: StructureScore,
}

pub fn score_structure(
    path: &Path,
    table: &ScoreTable,
    config: &PotentialConfig,
) -> Result<ScoredStructure, EngineError> {
    let residues =
        PdbFile::read_from_path(path, config).map_err(|e| EngineError::StructureRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    let score = Scorer::new(table, config).score_residues(&residues);
    debug!("Scored {:?}: {:.4}", path, score.total);
    Ok(ScoredStructure {
        path: path.to_path_buf(),
        score,
    })
}

/// Scores every structure in `paths`. Results keep the order of `paths`.
#[instrument(skip_all, name = "structure_scoring_task")]
pub fn run(
    label: &str,
    paths: &[PathBuf],
    table: &ScoreTable,
    config: &PotentialConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<ScoredStructure>, EngineError> {
    reporter.report(Progress::BatchStart {
        label: label.to_string(),
        total_structures: paths.len() as u64,
    });

    let score = |path: &PathBuf| {
        let result = score_structure(path, table, config);
        reporter.report(Progress::StructureDone);
        result
    };

    #[cfg(not(feature = "parallel"))]
    let scored = paths.iter().map(score).collect::<Result<Vec<_>, _>>()?;

    #[cfg(feature = "parallel")]
    let scored = paths.par_iter().map(score).collect::<Result<Vec<_>, _>>()?;

    reporter.report(Progress::BatchFinish);
    Ok(scored)
}
