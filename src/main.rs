mod cli;
mod config;
mod convert;
mod logging;
mod project;
mod results_cmd;
mod run_cmd;
mod schedule_cmd;
mod write_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Write(args) => write_cmd::run(args),
        Command::Run(args) => run_cmd::run(args),
        Command::Results(args) => results_cmd::run(args),
        Command::Schedule(args) => schedule_cmd::run(args),
    }
}
