// ABOUTME: Firmware image manifest written next to the generated image.
// ABOUTME: Records what was built, when, where, and by which host.

use crate::project::Target;
use crate::types::FirmwareVersion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Build record for a generated firmware image.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    pub image: String,
    pub image_size: u64,
    pub built_at: DateTime<Utc>,
    pub built_by: String,
}

impl Manifest {
    pub fn new(
        target: &Target,
        version: FirmwareVersion,
        image_path: &Path,
        image_size: u64,
    ) -> Self {
        Manifest {
            name: target.name.to_string(),
            version: version.to_string(),
            image: image_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            image_size,
            built_at: Utc::now(),
            built_by: gethostname::gethostname().to_string_lossy().into_owned(),
        }
    }
}
