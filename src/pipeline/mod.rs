// ABOUTME: The run pipeline: resolve target, build, image or cleanup, download, debug.
// ABOUTME: Pure orchestration over the Pipeline seam; printing and process exit stay in the CLI.

use crate::build::{BuildError, BuildOps};
use crate::image::{ImageError, ImageOps};
use crate::output::Output;
use crate::project::Target;
use thiserror::Error;

/// Factory seam over the build system.
///
/// The binary drives this with a `Project`; tests drive it with fakes to
/// observe stage ordering without touching a toolchain or a device.
pub trait Pipeline {
    type Builder: BuildOps;
    type Image: ImageOps;

    /// Look up a target by name. Absent is a lookup miss, reported by the
    /// pipeline as a usage failure, never as a stage failure.
    fn resolve_target(&self, name: &str) -> Option<Target>;

    fn builder(&self, target: &Target) -> Result<Self::Builder, BuildError>;

    fn image(&self, builder: &Self::Builder) -> Result<Self::Image, ImageError>;
}

/// Arguments to one pipeline run, as handed over by the CLI.
///
/// The version's mere presence selects image generation; its content is
/// only validated inside that branch.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub target: Option<String>,
    pub version: Option<String>,
}

/// Outcome classification for a failed run. Usage errors get the command
/// usage line appended by the CLI; stage errors pass through unmodified.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("must specify target")]
    MissingTarget,

    #[error("unknown target: {0}")]
    UnknownTarget(String),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Image(#[from] ImageError),
}

impl RunError {
    pub fn is_usage(&self) -> bool {
        matches!(self, RunError::MissingTarget | RunError::UnknownTarget(_))
    }
}

/// Run one target end to end: build, then either generate a versioned image
/// with its manifest or drop any stale image, then download and attach the
/// debugger. Strictly sequential; the first failure aborts the rest.
pub fn run<P: Pipeline>(
    pipeline: &P,
    request: &RunRequest,
    output: &Output,
) -> Result<(), RunError> {
    let name = request.target.as_deref().ok_or(RunError::MissingTarget)?;

    let target = pipeline
        .resolve_target(name)
        .ok_or_else(|| RunError::UnknownTarget(name.to_string()))?;

    let mut builder = pipeline.builder(&target)?;

    output.progress(&format!("  → Building {}...", target.name));
    builder.build()?;

    match request.version.as_deref() {
        Some(version) => {
            output.progress(&format!("  → Generating image (version {})...", version));
            let mut image = pipeline.image(&builder)?;
            image.set_version(version)?;
            image.generate()?;
            image.write_manifest(&target)?;
        }
        None => {
            // No version requested: drop any image left by an earlier
            // versioned run, so the download step can't pick up a stale
            // artifact. Removal is best-effort; a missing file is fine.
            let img_path = builder.app_image_path();
            if let Err(e) = std::fs::remove_file(&img_path) {
                tracing::debug!("could not remove stale image {}: {}", img_path.display(), e);
            }
        }
    }

    output.progress("  → Downloading to device...");
    builder.download()?;

    output.progress("  → Attaching debugger...");
    builder.debug()?;

    Ok(())
}
