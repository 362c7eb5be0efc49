// ABOUTME: Project configuration and target resolution for kiln.yml.
// ABOUTME: Handles YAML parsing, project file discovery, and the Pipeline impl over real builds.

mod deserialize;
mod target;

pub use target::{CommandSpec, Target};

use crate::build::{BuildError, FirmwareBuilder};
use crate::error::{Error, Result};
use crate::image::{FirmwareImage, ImageError};
use crate::pipeline::Pipeline;
use deserialize::deserialize_targets;
use nonempty::NonEmpty;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const PROJECT_FILENAME: &str = "kiln.yml";
pub const PROJECT_FILENAME_ALT: &str = "kiln.yaml";
pub const PROJECT_FILENAME_DIR: &str = ".kiln/project.yml";

/// A kiln project: a name and the targets that can be built from it.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub name: String,

    #[serde(deserialize_with = "deserialize_targets")]
    pub targets: NonEmpty<Target>,

    /// Directory the project file was discovered in. Artifact paths and
    /// tool invocations are resolved against this.
    #[serde(skip)]
    root: PathBuf,
}

impl Project {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut project = Self::from_yaml(&content)?;
        project.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(project)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(PROJECT_FILENAME),
            dir.join(PROJECT_FILENAME_ALT),
            dir.join(PROJECT_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                let mut project = Self::load(path)?;
                project.root = dir.to_path_buf();
                return Ok(project);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up a target by name. Absent is a lookup miss, not an error.
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name.as_str() == name)
    }
}

impl Pipeline for Project {
    type Builder = FirmwareBuilder;
    type Image = FirmwareImage;

    fn resolve_target(&self, name: &str) -> Option<Target> {
        self.target(name).cloned()
    }

    fn builder(&self, target: &Target) -> std::result::Result<FirmwareBuilder, BuildError> {
        FirmwareBuilder::new(self, target)
    }

    fn image(&self, builder: &FirmwareBuilder) -> std::result::Result<FirmwareImage, ImageError> {
        FirmwareImage::new(builder)
    }
}
