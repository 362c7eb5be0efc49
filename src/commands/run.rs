// ABOUTME: Run command implementation.
// ABOUTME: Discovers the project and hands the request to the pipeline.

use kiln::error::Result;
use kiln::output::Output;
use kiln::pipeline::{self, RunError, RunRequest};
use kiln::project::Project;
use std::env;

/// Build, image (or clean up), download, and debug one target.
pub fn run(target: Option<String>, version: Option<String>, mut output: Output) -> Result<()> {
    // A missing target is reportable without a project.
    if target.is_none() {
        return Err(RunError::MissingTarget.into());
    }

    output.start_timer();
    let cwd = env::current_dir()?;
    let project = Project::discover(&cwd)?;

    let request = RunRequest { target, version };
    pipeline::run(&project, &request, &output)?;

    output.success("Run complete");
    Ok(())
}
