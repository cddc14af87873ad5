use crate::cli::EvaluateArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use ribopot::{
    core::potential::params::PotentialConfig, engine::progress::ProgressReporter, workflows,
};
use std::fs::File;
use std::io::BufWriter;
use tracing::{info, warn};

pub fn run(args: EvaluateArgs, config: &PotentialConfig) -> Result<()> {
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core evaluation workflow...");
    let results = workflows::evaluate::run(&args.base_dir, &args.score_dir, config, &reporter)?;

    if results.is_empty() {
        warn!("No groups found in {:?}.", args.base_dir);
    }
    let tally = progress_handler.tally();
    info!(
        "Scored {} structure(s) across {} group(s).",
        tally.structures, tally.batches
    );
    for (name, group) in &results {
        println!(
            "Puzzle {}: Estimated Gibbs Free Energy = {:.4}",
            name,
            group.mean_energy()
        );
    }

    if let Some(report_path) = &args.report {
        info!("Writing per-structure report to {:?}", report_path);
        let file = File::create(report_path).map_err(|source| CliError::Output {
            path: report_path.clone(),
            source,
        })?;
        let writer = BufWriter::new(file);
        workflows::evaluate::write_report_csv(results.values(), writer)?;
        println!("✓ Report written to: {}", report_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;
    use tracing_subscriber::prelude::*;

    #[test]
    fn empty_base_directory_is_reported_as_a_warning() {
        let base = tempdir().unwrap();
        let scores = tempdir().unwrap();
        let log_path = scores.path().join("run.log");
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(Mutex::new(File::create(&log_path).unwrap()))
            .with_ansi(false);
        let args = EvaluateArgs {
            base_dir: base.path().to_path_buf(),
            score_dir: scores.path().to_path_buf(),
            report: None,
        };

        let subscriber = tracing_subscriber::registry().with(layer);
        let result = tracing::subscriber::with_default(subscriber, || {
            run(args, &PotentialConfig::default())
        });

        assert!(result.is_ok());
        let log = fs::read_to_string(&log_path).unwrap();
        assert!(log.contains("WARN"));
        assert!(log.contains("No groups found in"));
    }

    #[test]
    fn uncreatable_report_names_the_report_path() {
        let base = tempdir().unwrap();
        let scores = tempdir().unwrap();
        fs::create_dir(base.path().join("puzzle_1")).unwrap();
        let report = base.path().join("missing").join("report.csv");
        let args = EvaluateArgs {
            base_dir: base.path().to_path_buf(),
            score_dir: scores.path().to_path_buf(),
            report: Some(report.clone()),
        };

        match run(args, &PotentialConfig::default()) {
            Err(CliError::Output { path, .. }) => assert_eq!(path, report),
            other => panic!("Expected output file error, got {:?}", other),
        }
    }
}
