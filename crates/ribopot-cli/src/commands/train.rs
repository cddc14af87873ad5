use crate::cli::TrainArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use ribopot::{
    core::potential::params::PotentialConfig, engine::progress::ProgressReporter, workflows,
};
use tracing::{debug, info, warn};

pub fn run(args: TrainArgs, config: &PotentialConfig) -> Result<()> {
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Training potential from {}...", args.input_dir.display());
    info!("Invoking the core training workflow...");

    let summary = workflows::train::run(&args.input_dir, &args.output_dir, config, &reporter)?;
    let result = &summary.result;

    if result.structures == 0 {
        warn!("No structures were found; the written profiles carry no information.");
    }
    let tally = progress_handler.tally();
    debug!(
        "Progress handler saw {} structure(s) in {} batch(es).",
        tally.structures, tally.batches
    );
    for (key, count) in &result.pair_counts {
        info!("Pair {}: {} observation(s).", key, count);
    }

    println!(
        "✓ Trained on {} structure(s) ({} residue(s)); wrote {} pair profile(s) to: {}",
        result.structures,
        result.residues,
        summary.written_pairs.len(),
        summary.output_dir.display()
    );
    Ok(())
}
