// ABOUTME: Validated domain types for kiln.
// ABOUTME: Re-exports target names and firmware versions.

mod target_name;
mod version;

pub use target_name::{TargetName, TargetNameError};
pub use version::{FirmwareVersion, VersionError};
