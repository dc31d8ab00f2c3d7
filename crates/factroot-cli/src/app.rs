//! CLI argument definitions

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use factroot_core::{DataType, Sector, Source};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "factroot")]
#[command(
    author,
    version,
    about = "Answer engineering questions from authoritative sources first"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "FACTROOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a single question
    Resolve(ResolveArgs),

    /// Resolve every question in a file, one per line
    Batch(BatchArgs),

    /// Feed a human review of a flagged answer back into the learning loop
    Verify(VerifyArgs),
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Question text
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Sector, skipping classification
    #[arg(long)]
    pub sector: Option<Sector>,

    /// Data type, skipping classification
    #[arg(long)]
    pub data_type: Option<DataType>,

    /// Never fall back to ML prediction
    #[arg(long)]
    pub deterministic_only: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// File with one question per line (`#` starts a comment)
    pub file: PathBuf,

    /// Never fall back to ML prediction
    #[arg(long)]
    pub deterministic_only: bool,
}

#[derive(Args)]
#[command(group(
    ArgGroup::new("review")
        .required(true)
        .args(["confirm", "correct", "inconclusive"])
))]
pub struct VerifyArgs {
    /// JSON result previously printed by `factroot resolve --format json`
    pub result: PathBuf,

    /// Reviewer found the answer in this source
    #[arg(long, requires = "citation")]
    pub confirm: Option<Source>,

    /// Reviewer found a different answer
    #[arg(long, requires_all = ["source", "citation"])]
    pub correct: Option<String>,

    /// Source of the corrected answer
    #[arg(long, conflicts_with = "confirm")]
    pub source: Option<Source>,

    /// Citation backing the review
    #[arg(long)]
    pub citation: Option<String>,

    /// Reviewer found no authoritative source
    #[arg(long)]
    pub inconclusive: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
}
