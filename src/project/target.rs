// ABOUTME: Target definition: a named build configuration inside a project.
// ABOUTME: Each target carries its app path and the build/download/debug tool commands.

use crate::types::TargetName;
use nonempty::NonEmpty;
use serde::Deserialize;
use std::path::PathBuf;

use super::deserialize::{deserialize_command, deserialize_target_name};

/// A named build configuration.
///
/// The build command is expected to leave an ELF at the artifact path the
/// builder reports via `KILN_ELF_PATH`; download and debug are handed the
/// same environment and talk to the attached device however the target's
/// tooling requires.
#[derive(Debug, Clone, Deserialize)]
pub struct Target {
    #[serde(deserialize_with = "deserialize_target_name")]
    pub name: TargetName,

    /// Application source directory, relative to the project root.
    pub app: PathBuf,

    #[serde(deserialize_with = "deserialize_command")]
    pub build: CommandSpec,

    #[serde(deserialize_with = "deserialize_command")]
    pub download: CommandSpec,

    #[serde(deserialize_with = "deserialize_command")]
    pub debug: CommandSpec,
}

/// An external tool invocation: program plus arguments.
#[derive(Debug, Clone)]
pub struct CommandSpec(NonEmpty<String>);

impl CommandSpec {
    pub fn new(program: &str, args: &[&str]) -> Self {
        let mut argv = NonEmpty::new(program.to_string());
        argv.tail = args.iter().map(|a| a.to_string()).collect();
        Self(argv)
    }

    /// Parse a whitespace-separated command line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let argv: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        Self::from_argv(argv)
    }

    pub fn from_argv(argv: Vec<String>) -> Result<Self, String> {
        NonEmpty::from_vec(argv)
            .map(Self)
            .ok_or_else(|| "command cannot be empty".to_string())
    }

    pub fn program(&self) -> &str {
        &self.0.head
    }

    pub fn args(&self) -> &[String] {
        &self.0.tail
    }
}
