mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::config::PartialPotentialConfig;
use crate::error::Result;
use crate::logging::LogSettings;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    LogSettings::from_flags(cli.verbose, cli.quiet, cli.log_file.clone()).init()?;

    info!("RiboPot CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()?;
    }

    info!("Merging configuration from file and CLI arguments...");
    let config = PartialPotentialConfig::load(cli.config.as_deref())?.merge_with_cli(&cli.set_values)?;
    debug!("Effective potential configuration: {:?}", config);

    let command_result = match cli.command {
        Commands::Train(args) => {
            info!("Dispatching to 'train' command.");
            commands::train::run(args, &config)
        }
        Commands::Evaluate(args) => {
            info!("Dispatching to 'evaluate' command.");
            commands::evaluate::run(args, &config)
        }
        Commands::Profile(args) => {
            info!("Dispatching to 'profile' command.");
            commands::profile::run(args, &config)
        }
    };

    match &command_result {
        Ok(_) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    command_result
}
