use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vdiff",
    about = "Structural diff and patch for JSON documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with comparator tolerances
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the edit script from SOURCE to TARGET
    Diff(DiffArgs),
    /// Apply an edit script to SOURCE and print the result as JSON (compact with `--format json`)
    Patch(PatchArgs),
    /// Compare two documents with the deep comparator
    Eq(EqArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub source: PathBuf,
    pub target: PathBuf,
}

#[derive(Args)]
pub struct PatchArgs {
    pub source: PathBuf,
    /// JSON array of operation records, as printed by `vdiff diff --format json`
    pub script: PathBuf,
}

#[derive(Args)]
pub struct EqArgs {
    pub left: PathBuf,
    pub right: PathBuf,
}
