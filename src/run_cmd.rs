//! Run command: write inputs, then drive the external programs in order.

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use lumpr_run::{run_lr2series, run_lumprem, run_lumprep};

use crate::cli::RunArgs;
use crate::project::Project;

pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();
    let project = Project::load(&args.config, args.workspace)?;
    let exe = &project.config.executables;
    let workspace = project.workspace();

    // 1. Decks, directly or through LUMPREP
    if args.lumprep {
        let infile = project
            .write_lumprep()?
            .ok_or_else(|| anyhow!("--lumprep needs a [lumprep] table in the config"))?;
        run_lumprep(&exe.lumprep, workspace, &infile).context("LUMPREP failed")?;
    } else {
        project.write_decks()?;
    }
    project.write_irrigation()?;

    // 2. One LUMPREM run per model, in config order
    for model in &project.models {
        info!(model = model.name(), "running LUMPREM");
        run_lumprem(&exe.lumprem, workspace, model.name())
            .with_context(|| format!("LUMPREM failed for model '{}'", model.name()))?;
    }

    // 3. Optional MF6 conversion
    if args.bridge {
        let infile = project
            .write_bridge()?
            .ok_or_else(|| anyhow!("--bridge needs a [bridge] table in the config"))?;
        run_lr2series(&exe.lr2series, workspace, &infile).context("lr2series failed")?;
    }

    info!(n_models = project.models.len(), "run complete");
    Ok(())
}
