//! Write command: generate every input file without running anything.

use anyhow::Result;
use tracing::{info, info_span};

use crate::cli::WriteArgs;
use crate::project::Project;

pub fn run(args: WriteArgs) -> Result<()> {
    let _cmd = info_span!("write").entered();
    let project = Project::load(&args.config, args.workspace)?;

    project.write_decks()?;
    project.write_irrigation()?;
    if let Some(file) = project.write_lumprep()? {
        info!(file = %file, "LUMPREP input ready");
    }
    if let Some(file) = project.write_bridge()? {
        info!(file = %file, "lr2series input ready");
    }
    info!(
        n_models = project.models.len(),
        workspace = %project.workspace().display(),
        "inputs written"
    );
    Ok(())
}
