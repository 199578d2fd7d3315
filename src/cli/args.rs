//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{
    check::CheckArgs, codes::CodesArgs, config::ConfigCommands, generate::GenerateArgs,
    list::ListArgs, pair::PairArgs, show::ShowArgs, sizes::SizesArgs, status::StatusArgs,
};

#[derive(Parser)]
#[command(name = "tripta")]
#[command(author, version, about = "DIN 32676 A fitting preset catalog")]
#[command(
    long_about = "Lookup, validation, and compatibility checking over the ferrule and gasket preset tables, plus geometry parameter generation for CAD consumers."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Directory holding the preset tables
    #[arg(long, global = true, default_value = "data", env = "TRIPTA_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Settings file (default: ./tripta_config.json)
    #[arg(long, global = true, env = "TRIPTA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalog presets
    List(ListArgs),

    /// Show one preset's full parameter map
    Show(ShowArgs),

    /// List available nominal sizes
    Sizes(SizesArgs),

    /// List available diameter codes
    Codes(CodesArgs),

    /// Look up the compatible ferrule/gasket pair for a size
    Pair(PairArgs),

    /// Show catalog load state and counts
    Status(StatusArgs),

    /// Check table availability and integrity
    Check(CheckArgs),

    /// Generate a geometry descriptor for a preset
    Generate(GenerateArgs),

    /// Manage persisted settings
    #[command(subcommand)]
    Config(ConfigCommands),
}
