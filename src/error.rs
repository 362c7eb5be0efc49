// ABOUTME: Application-wide error types for kiln.
// ABOUTME: Configuration and IO failures plus transparent pipeline errors.

use crate::pipeline::RunError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("project file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Run(#[from] RunError),
}

impl Error {
    /// Whether the CLI should append a usage hint when reporting this error.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Run(e) if e.is_usage())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
