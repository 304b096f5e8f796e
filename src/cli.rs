use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// lumpr: deck generation and orchestration for LUMPREM.
#[derive(Parser)]
#[command(
    name = "lumpr",
    version,
    about = "Write, run and collect LUMPREM rainfall-runoff models"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Write decks, templates, irrigation files and optional LUMPREP and
    /// lr2series inputs.
    Write(WriteArgs),
    /// Write inputs, then run LUMPREM for every model.
    Run(RunArgs),
    /// Read every model's output and join it with its parameters as JSON.
    Results(ResultsArgs),
    /// Print the resolved output day list.
    Schedule(ScheduleArgs),
}

/// Arguments for the `write` subcommand.
#[derive(clap::Args)]
pub struct WriteArgs {
    /// Path to TOML project file.
    #[arg(short, long, default_value = "lumpr.toml")]
    pub config: PathBuf,

    /// Override the workspace directory from config.
    #[arg(short, long)]
    pub workspace: Option<PathBuf>,
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML project file.
    #[arg(short, long, default_value = "lumpr.toml")]
    pub config: PathBuf,

    /// Override the workspace directory from config.
    #[arg(short, long)]
    pub workspace: Option<PathBuf>,

    /// Generate decks with LUMPREP instead of writing them directly.
    #[arg(long)]
    pub lumprep: bool,

    /// Run lr2series after LUMPREM.
    #[arg(long)]
    pub bridge: bool,
}

/// Arguments for the `results` subcommand.
#[derive(clap::Args)]
pub struct ResultsArgs {
    /// Path to TOML project file.
    #[arg(short, long, default_value = "lumpr.toml")]
    pub config: PathBuf,

    /// Override the workspace directory from config.
    #[arg(short, long)]
    pub workspace: Option<PathBuf>,

    /// Path for JSON output (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `schedule` subcommand.
#[derive(clap::Args)]
pub struct ScheduleArgs {
    /// Path to TOML project file.
    #[arg(short, long, default_value = "lumpr.toml")]
    pub config: PathBuf,
}
