//! lutgen - generate color-grading 3D LUTs as `.cube` files.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lutgen_core::{CubeSize, Parameter};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "lutgen")]
#[command(author, version, about = "Generate color-grading 3D LUTs as .cube files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a .cube LUT
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),
    /// List the grading parameters
    Params,
    /// Summarize a .cube file
    #[command(visible_alias = "i")]
    Inspect(InspectArgs),
    /// Write a preset file
    Preset(PresetArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Lattice points per axis (17, 33 and 65 are typical)
    #[arg(short, long)]
    pub size: Option<CubeSize>,

    /// Preset file to start from
    #[arg(short, long)]
    pub preset: Option<PathBuf>,

    /// Suggestion JSON, either a saved model response or the bare object
    #[arg(long)]
    pub suggestion: Option<PathBuf>,

    /// Parameter override, e.g. --set exposure=0.5 (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_set)]
    pub set: Vec<(Parameter, f64)>,

    /// Title written into the LUT header
    #[arg(short, long)]
    pub title: Option<String>,

    /// Output path (default: generated_lut_NxN.cube)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct InspectArgs {
    /// .cube file to read
    pub input: PathBuf,

    /// Also print the interpolated output at R,G,B
    #[arg(long, value_name = "R,G,B")]
    pub lookup: Option<String>,
}

#[derive(Args)]
pub struct PresetArgs {
    /// Preset file to write
    pub output: PathBuf,

    /// Lattice points per axis
    #[arg(short, long)]
    pub size: Option<CubeSize>,

    /// Parameter value, e.g. --set contrast=1.1 (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_set)]
    pub set: Vec<(Parameter, f64)>,

    /// Title written into generated LUT headers
    #[arg(short, long)]
    pub title: Option<String>,
}

fn parse_set(text: &str) -> std::result::Result<(Parameter, f64), String> {
    lutgen_core::params::parse_assignment(text).map_err(|e| e.to_string())
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
        debug!(threads = cli.threads, "Configured thread pool");
    }

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Params => commands::params::run(),
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::Preset(args) => commands::preset::run(args),
    }
}
