// ABOUTME: Error types for builder operations.
// ABOUTME: Covers target validation, tool launch, and per-stage tool failures.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors from constructing a builder or running its external tools.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Target configuration points at an app directory that does not exist.
    #[error("app directory not found: {0}")]
    AppNotFound(PathBuf),

    /// Could not create the per-target artifact directory.
    #[error("failed to create artifact directory {path}: {source}")]
    ArtifactDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An external tool could not be spawned at all.
    #[error("failed to launch {tool}: {source}")]
    ToolLaunch {
        tool: String,
        source: std::io::Error,
    },

    /// The build command ran but did not succeed.
    #[error("build failed: {status}")]
    BuildFailed { status: ExitStatus },

    /// The download command ran but did not succeed.
    #[error("download failed: {status}")]
    DownloadFailed { status: ExitStatus },

    /// The debugger exited with a failure.
    #[error("debugger failed: {status}")]
    DebugFailed { status: ExitStatus },
}
