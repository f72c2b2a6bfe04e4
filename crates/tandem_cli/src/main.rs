//! Tandem CLI: the command-line interface for the tandem placer.
//!
//! Provides `tandem run` for the full partition-and-legalize flow,
//! `tandem partition` for inspecting the two-way split alone, and
//! `tandem stats` for summarizing a layout file.

#![warn(missing_docs)]

mod partition;
mod pipeline;
mod run;
mod stats;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Tandem: two-way partitioning and Abacus row legalization.
#[derive(Parser, Debug)]
#[command(name = "tandem", version, about = "Tandem cell placer")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `tandem.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Partition and legalize a layout, writing the final placement.
    Run(RunArgs),
    /// Partition a layout and print the split.
    Partition(PartitionArgs),
    /// Print statistics about a layout.
    Stats(StatsArgs),
}

/// Arguments for the `tandem run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Layout file to read.
    pub input: PathBuf,

    /// Placement file to write.
    pub output: PathBuf,

    /// Number of partitioning restarts (overrides the config file).
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Seed for the partitioning restarts.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Format of the placement file.
    #[arg(short, long, value_enum)]
    pub format: Option<PlacementFormat>,

    /// Legalize the two groups concurrently.
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for the `tandem partition` subcommand.
#[derive(Parser, Debug)]
pub struct PartitionArgs {
    /// Layout file to read.
    pub input: PathBuf,

    /// Number of partitioning restarts (overrides the config file).
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Seed for the partitioning restarts.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `tandem stats` subcommand.
#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Layout file to read.
    pub input: PathBuf,
}

/// Placement file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlacementFormat {
    /// One `<name> <x> <y> <side>` line per cell.
    Text,
    /// A JSON placement report.
    Json,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a config file.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::env::var("TERM").is_ok(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };
    init_tracing(cli.quiet, cli.verbose);

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Run(ref args) => run::run(args, &global),
        Command::Partition(ref args) => partition::run(args, &global),
        Command::Stats(ref args) => stats::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over the flags.
fn init_tracing(quiet: bool, verbose: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
