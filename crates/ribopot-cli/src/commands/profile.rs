use crate::cli::ProfileArgs;
use crate::error::{CliError, Result};
use ribopot::{core::potential::params::PotentialConfig, workflows};
use std::fs::File;
use std::io::BufWriter;
use tracing::{info, warn};

pub fn run(args: ProfileArgs, config: &PotentialConfig) -> Result<()> {
    let profiles = workflows::profile::run(&args.score_dir, config)?;
    if profiles.is_empty() {
        warn!("No pair profiles found in {:?}.", args.score_dir);
    }

    info!("Writing interpolated profiles to {:?}", args.output);
    let file = File::create(&args.output).map_err(|source| CliError::Output {
        path: args.output.clone(),
        source,
    })?;
    let writer = BufWriter::new(file);
    workflows::profile::write_csv(&profiles, writer)?;

    println!(
        "✓ {} interaction profile(s) written to: {}",
        profiles.len(),
        args.output.display()
    );
    Ok(())
}
