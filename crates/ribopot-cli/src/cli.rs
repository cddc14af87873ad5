use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "RiboPot Developers",
    version,
    about = "RiboPot CLI - Train and apply a distance-based statistical potential for scoring RNA 3D structures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S potential.max-score=8
    #[arg(
        short = 'S',
        long = "set",
        global = true,
        value_name = "KEY=VALUE",
        num_args = 1,
        action = clap::ArgAction::Append
    )]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive pair score profiles from a directory of native PDB structures.
    Train(TrainArgs),
    /// Score groups of candidate structures against a trained potential.
    Evaluate(EvaluateArgs),
    /// Export interpolated interaction profiles of a trained potential as CSV.
    Profile(ProfileArgs),
}

/// Arguments for the `train` subcommand.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory containing the training `*.pdb` files.
    #[arg(required = true, value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory where the `<PAIR>.txt` score files are written.
    #[arg(required = true, value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,
}

/// Arguments for the `evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Directory whose sub-directories each hold one group of `*.pdb` candidates.
    #[arg(required = true, value_name = "BASE_DIR")]
    pub base_dir: PathBuf,

    /// Directory containing the trained `<PAIR>.txt` score files.
    #[arg(required = true, value_name = "SCORE_DIR")]
    pub score_dir: PathBuf,

    /// Also write per-structure energies to a CSV report.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// Arguments for the `profile` subcommand.
#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Directory containing the trained `<PAIR>.txt` score files.
    #[arg(required = true, value_name = "SCORE_DIR")]
    pub score_dir: PathBuf,

    /// Destination CSV file for the interpolated profiles.
    #[arg(required = true, value_name = "OUTPUT_CSV")]
    pub output: PathBuf,
}
