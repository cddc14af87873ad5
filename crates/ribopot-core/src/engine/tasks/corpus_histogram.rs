use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::StructureFile;
use crate::core::potential::histogram::DistanceHistogram;
use crate::core::potential::params::PotentialConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Distance counts summed over a set of structures.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusHistogram {
    pub histogram: DistanceHistogram,
    pub structures: usize,
    pub residues: usize,
}

impl CorpusHistogram {
    pub fn empty(num_bins: usize) -> Self {
        Self {
            histogram: DistanceHistogram::new(num_bins),
            structures: 0,
            residues: 0,
        }
    }

    pub fn merge(mut self, other: CorpusHistogram) -> Self {
        self.histogram.merge_from(&other.histogram);
        self.structures += other.structures;
        self.residues += other.residues;
        self
    }
}

/// Reads one structure and counts its distances.
pub fn count_structure(path: &Path, config: &PotentialConfig) -> Result<CorpusHistogram, EngineError> {
    let residues =
        PdbFile::read_from_path(path, config).map_err(|e| EngineError::StructureRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    let histogram = DistanceHistogram::from_residues(&residues, config);
    debug!(
        "Counted {} residue(s), {} pair observation(s) in {:?}",
        residues.len(),
        histogram.total(),
        path
    );
    Ok(CorpusHistogram {
        histogram,
        structures: 1,
        residues: residues.len(),
    })
}

#[instrument(skip_all, name = "corpus_histogram_task")]
pub fn run(
    paths: &[PathBuf],
    config: &PotentialConfig,
    reporter: &ProgressReporter,
) -> Result<CorpusHistogram, EngineError> {
    reporter.report(Progress::BatchStart {
        label: "Counting distances".to_string(),
        total_structures: paths.len() as u64,
    });

    let count = |path: &PathBuf| {
        let result = count_structure(path, config);
        reporter.report(Progress::StructureDone);
        result
    };

    #[cfg(not(feature = "parallel"))]
    let corpus = paths
        .iter()
        .map(count)
        .try_fold(CorpusHistogram::empty(config.num_bins), |acc, item| {
            Ok::<_, EngineError>(acc.merge(item?))
        })?;

    #[cfg(feature = "parallel")]
    let corpus = paths
        .par_iter()
        .map(count)
        .try_reduce(
            || CorpusHistogram::empty(config.num_bins),
            |acc, item| Ok(acc.merge(item)),
        )?;

    reporter.report(Progress::BatchFinish);
    Ok(corpus)
}
