// ABOUTME: Target name validation.
// ABOUTME: Target names double as artifact directory names, so the character set is restricted.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TargetNameError {
    #[error("target name cannot be empty")]
    Empty,

    #[error("target name exceeds maximum length of 64 characters")]
    TooLong,

    #[error("target name cannot start with a hyphen")]
    StartsWithHyphen,

    #[error("invalid character in target name: '{0}'")]
    InvalidChar(char),
}

/// A validated target name. Used both to look targets up and to name the
/// `bin/targets/<name>` artifact directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetName(String);

impl TargetName {
    pub fn new(value: &str) -> Result<Self, TargetNameError> {
        if value.is_empty() {
            return Err(TargetNameError::Empty);
        }

        if value.len() > 64 {
            return Err(TargetNameError::TooLong);
        }

        if value.starts_with('-') {
            return Err(TargetNameError::StartsWithHyphen);
        }

        for c in value.chars() {
            if !c.is_ascii_alphanumeric() && c != '_' && c != '-' {
                return Err(TargetNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
