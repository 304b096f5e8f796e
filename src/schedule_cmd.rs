//! Schedule command: print the resolved output days.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use tracing::info_span;

use crate::cli::ScheduleArgs;
use crate::config::LumprConfig;
use crate::convert;

pub fn run(args: ScheduleArgs) -> Result<()> {
    let _cmd = info_span!("schedule").entered();
    let toml_str = fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: LumprConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;
    let schedule = convert::build_schedule(&config.simulation)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "num_days {}", schedule.num_days())?;
    for day in schedule.days() {
        writeln!(stdout, "{day}")?;
    }
    Ok(())
}
