use crate::core::io::score_table::ScoreTableFile;
use crate::core::models::pair::PairKey;
use crate::core::potential::params::PotentialConfig;
use crate::core::potential::table::ScoreTable;
use crate::core::potential::training::derive_score_table;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks;
use crate::engine::utils::files::list_structure_files;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct TrainingResult {
    pub table: ScoreTable,
    pub structures: usize,
    pub residues: usize,
    /// Aggregated observation count per canonical pair (zero for unseen pairs).
    pub pair_counts: BTreeMap<PairKey, u64>,
}

#[derive(Debug, Clone)]
pub struct TrainingSummary {
    pub result: TrainingResult,
    pub written_pairs: Vec<PairKey>,
    pub output_dir: PathBuf,
}

/// Trains a potential from explicit structure files without touching the disk
/// beyond reading them.
#[instrument(skip_all, name = "potential_training")]
pub fn train_from_paths(
    paths: &[PathBuf],
    config: &PotentialConfig,
    reporter: &ProgressReporter,
) -> Result<TrainingResult, EngineError> {
    // === Phase 1: Fan out over structures and reduce their histograms ===
    let corpus = tasks::corpus_histogram::run(paths, config, reporter)?;
    info!(
        "Counted {} pair observation(s) over {} residue(s) in {} structure(s).",
        corpus.histogram.total(),
        corpus.residues,
        corpus.structures
    );

    // === Phase 2: Derive the log-odds potential ===
    reporter.report(Progress::PhaseStart {
        name: "Deriving potential",
    });
    let table = derive_score_table(&corpus.histogram, config);
    let pair_counts = PairKey::ALL
        .iter()
        .map(|key| (*key, corpus.histogram.pair_total(key)))
        .collect();
    reporter.report(Progress::PhaseFinish);

    Ok(TrainingResult {
        table,
        structures: corpus.structures,
        residues: corpus.residues,
        pair_counts,
    })
}

/// Trains a potential from every `*.pdb` file in `input_dir` and writes the score
/// table into `output_dir`.
#[instrument(skip_all, name = "training_workflow")]
pub fn run(
    input_dir: &Path,
    output_dir: &Path,
    config: &PotentialConfig,
    reporter: &ProgressReporter,
) -> Result<TrainingSummary, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Collecting structures",
    });
    let paths = list_structure_files(input_dir)?;
    info!("Found {} structure file(s) in {:?}.", paths.len(), input_dir);
    if paths.is_empty() {
        warn!(
            "No structure files found in {:?}; every pair will receive the sentinel profile.",
            input_dir
        );
        reporter.report(Progress::Message(format!(
            "No structure files in {}",
            input_dir.display()
        )));
    }
    reporter.report(Progress::PhaseFinish);

    let result = train_from_paths(&paths, config, reporter)?;

    reporter.report(Progress::PhaseStart {
        name: "Writing score table",
    });
    let written_pairs = ScoreTableFile::write_to_dir(&result.table, output_dir)?;
    reporter.report(Progress::PhaseFinish);
    info!(
        "Wrote {} pair profile(s) to {:?}.",
        written_pairs.len(),
        output_dir
    );

    Ok(TrainingSummary {
        result,
        written_pairs,
        output_dir: output_dir.to_path_buf(),
    })
}
