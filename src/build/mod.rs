// ABOUTME: Builder contract and the concrete firmware builder.
// ABOUTME: Owns the bin/targets/<name>/ artifact layout and runs the target's external tools.

mod error;

pub use error::BuildError;

use crate::project::{CommandSpec, Project, Target};
use std::path::PathBuf;
use std::process::Command;

/// Builder operations consumed by the run pipeline.
///
/// The concrete implementation shells out to per-target tools; tests drive
/// the pipeline with fakes instead.
pub trait BuildOps {
    /// Compile the target application.
    fn build(&mut self) -> Result<(), BuildError>;

    /// Where the versioned application image for this target lives.
    fn app_image_path(&self) -> PathBuf;

    /// Load the built artifact onto the attached device.
    fn download(&mut self) -> Result<(), BuildError>;

    /// Attach a debugger to the device.
    fn debug(&mut self) -> Result<(), BuildError>;
}

/// Builds one target by invoking its configured external tools from the
/// project root. Created fresh per invocation.
pub struct FirmwareBuilder {
    target: Target,
    project_name: String,
    project_root: PathBuf,
    bin_dir: PathBuf,
}

impl FirmwareBuilder {
    /// Bind a builder to a resolved target, validating its configuration
    /// and creating the artifact directory.
    pub fn new(project: &Project, target: &Target) -> Result<Self, BuildError> {
        let app_dir = project.root().join(&target.app);
        if !app_dir.is_dir() {
            return Err(BuildError::AppNotFound(app_dir));
        }

        let bin_dir = project
            .root()
            .join("bin")
            .join("targets")
            .join(target.name.as_str());
        std::fs::create_dir_all(&bin_dir).map_err(|source| BuildError::ArtifactDir {
            path: bin_dir.clone(),
            source,
        })?;

        Ok(Self {
            target: target.clone(),
            project_name: project.name.clone(),
            project_root: project.root().to_path_buf(),
            bin_dir,
        })
    }

    pub fn app_elf_path(&self) -> PathBuf {
        self.bin_dir.join("app.elf")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.bin_dir.join("manifest.json")
    }

    /// Environment handed to every external tool. Tools locate the project
    /// and artifacts through these rather than positional arguments.
    fn tool_env(&self) -> Vec<(String, String)> {
        let app_dir = self.project_root.join(&self.target.app);
        vec![
            ("KILN_PROJECT".to_string(), self.project_name.clone()),
            ("KILN_TARGET".to_string(), self.target.name.to_string()),
            ("KILN_APP".to_string(), app_dir.display().to_string()),
            ("KILN_BIN_DIR".to_string(), self.bin_dir.display().to_string()),
            (
                "KILN_ELF_PATH".to_string(),
                self.app_elf_path().display().to_string(),
            ),
            (
                "KILN_IMG_PATH".to_string(),
                self.bin_dir.join("app.img").display().to_string(),
            ),
        ]
    }

    /// Run one external tool with stdio inherited, so build output and
    /// interactive debug sessions reach the user directly.
    fn run_tool(&self, spec: &CommandSpec) -> Result<std::process::ExitStatus, BuildError> {
        tracing::debug!(
            "running {} for target {}",
            spec.program(),
            self.target.name
        );

        Command::new(spec.program())
            .args(spec.args())
            .current_dir(&self.project_root)
            .envs(self.tool_env())
            .status()
            .map_err(|source| BuildError::ToolLaunch {
                tool: spec.program().to_string(),
                source,
            })
    }
}

impl BuildOps for FirmwareBuilder {
    fn build(&mut self) -> Result<(), BuildError> {
        let status = self.run_tool(&self.target.build)?;
        if !status.success() {
            return Err(BuildError::BuildFailed { status });
        }
        Ok(())
    }

    fn app_image_path(&self) -> PathBuf {
        self.bin_dir.join("app.img")
    }

    fn download(&mut self) -> Result<(), BuildError> {
        let status = self.run_tool(&self.target.download)?;
        if !status.success() {
            return Err(BuildError::DownloadFailed { status });
        }
        Ok(())
    }

    fn debug(&mut self) -> Result<(), BuildError> {
        let status = self.run_tool(&self.target.debug)?;
        if !status.success() {
            return Err(BuildError::DebugFailed { status });
        }
        Ok(())
    }
}
