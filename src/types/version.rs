// ABOUTME: Firmware version parsing and formatting.
// ABOUTME: Versions have the shape major[.minor[.rev[.build]]] with fixed-width fields.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("version cannot be empty")]
    Empty,

    #[error("version has too many components (at most major.minor.rev.build)")]
    TooManyComponents,

    #[error("invalid version component: '{0}'")]
    InvalidComponent(String),
}

/// A firmware version as stamped into the image header.
///
/// Components omitted in the input default to zero, so "1.2" parses the
/// same as "1.2.0.0".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
    pub rev: u16,
    pub build_num: u32,
}

impl FromStr for FirmwareVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(VersionError::Empty);
        }

        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() > 4 {
            return Err(VersionError::TooManyComponents);
        }

        Ok(FirmwareVersion {
            major: parse_part(parts[0])?,
            minor: parts.get(1).copied().map(parse_part).transpose()?.unwrap_or(0),
            rev: parts.get(2).copied().map(parse_part).transpose()?.unwrap_or(0),
            build_num: parts.get(3).copied().map(parse_part).transpose()?.unwrap_or(0),
        })
    }
}

fn parse_part<T: FromStr>(raw: &str) -> Result<T, VersionError> {
    raw.parse()
        .map_err(|_| VersionError::InvalidComponent(raw.to_string()))
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.rev, self.build_num
        )
    }
}
