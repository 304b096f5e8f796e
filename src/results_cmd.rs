//! Results command: join LUMPREM output with model parameters.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use lumpr_io::{join_results, read_results};

use crate::cli::ResultsArgs;
use crate::convert;
use crate::project::Project;

pub fn run(args: ResultsArgs) -> Result<()> {
    let _cmd = info_span!("results").entered();
    let project = Project::load(&args.config, args.workspace)?;
    let results_cfg = convert::build_results_config(&project.config.results);

    let mut tables = Vec::with_capacity(project.models.len());
    for model in &project.models {
        let path = project.workspace().join(model.output_file_name());
        let table = read_results(&path, &results_cfg)
            .with_context(|| format!("failed to read results for model '{}'", model.name()))?;
        tables.push((model, table));
    }
    let combined = join_results(tables)?;
    let json = serde_json::to_string_pretty(&combined).context("failed to serialise results")?;

    match args.output {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "results written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write to stdout")?;
        }
    }
    Ok(())
}
