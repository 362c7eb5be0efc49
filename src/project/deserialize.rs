// ABOUTME: Custom serde deserializers for project types.
// ABOUTME: Handles target names, target lists, and command specs.

use nonempty::NonEmpty;
use serde::Deserialize;
use std::collections::HashSet;

use super::target::{CommandSpec, Target};
use crate::types::TargetName;

pub fn deserialize_target_name<'de, D>(deserializer: D) -> Result<TargetName, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    TargetName::new(&s).map_err(serde::de::Error::custom)
}

pub fn deserialize_targets<'de, D>(deserializer: D) -> Result<NonEmpty<Target>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let targets: Vec<Target> = Vec::deserialize(deserializer)?;

    let mut seen = HashSet::new();
    for target in &targets {
        if !seen.insert(target.name.as_str().to_string()) {
            return Err(serde::de::Error::custom(format!(
                "duplicate target name: {}",
                target.name
            )));
        }
    }

    NonEmpty::from_vec(targets)
        .ok_or_else(|| serde::de::Error::custom("at least one target is required"))
}

pub fn deserialize_command<'de, D>(deserializer: D) -> Result<CommandSpec, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entry = CommandEntry::deserialize(deserializer)?;
    entry.into_command_spec().map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CommandEntry {
    Line(String),
    Argv(Vec<String>),
}

impl CommandEntry {
    fn into_command_spec(self) -> Result<CommandSpec, String> {
        match self {
            CommandEntry::Line(line) => CommandSpec::parse(&line),
            CommandEntry::Argv(argv) => CommandSpec::from_argv(argv),
        }
    }
}
