// ABOUTME: Image contract and the concrete versioned firmware image.
// ABOUTME: Prepends a fixed header to the app binary and writes the build manifest.

mod manifest;

pub use manifest::Manifest;

use crate::build::{BuildOps, FirmwareBuilder};
use crate::project::Target;
use crate::types::{FirmwareVersion, VersionError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Image operations consumed by the run pipeline, in the order the pipeline
/// invokes them: set_version, generate, write_manifest.
pub trait ImageOps {
    fn set_version(&mut self, version: &str) -> Result<(), ImageError>;

    fn generate(&mut self) -> Result<(), ImageError>;

    fn write_manifest(&mut self, target: &Target) -> Result<(), ImageError>;
}

/// Errors from image generation.
#[derive(Debug, Error)]
pub enum ImageError {
    /// No application binary to wrap; the target has not been built.
    #[error("no application binary at {0}")]
    MissingBinary(PathBuf),

    #[error(transparent)]
    Version(#[from] VersionError),

    /// generate() called before set_version().
    #[error("image version not set")]
    VersionNotSet,

    /// write_manifest() called before generate().
    #[error("image not generated")]
    NotGenerated,

    /// The header stores the payload size as a u32.
    #[error("application binary too large for image header: {0} bytes")]
    BinaryTooLarge(u64),

    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

const IMAGE_MAGIC: u32 = 0x4B49_4C4E;
const IMAGE_HEADER_SIZE: u32 = 24;

/// Fixed little-endian header prepended to the application binary.
struct ImageHeader {
    version: FirmwareVersion,
    payload_size: u32,
}

impl ImageHeader {
    fn encode(&self) -> [u8; IMAGE_HEADER_SIZE as usize] {
        let mut buf = [0u8; IMAGE_HEADER_SIZE as usize];
        buf[0..4].copy_from_slice(&IMAGE_MAGIC.to_le_bytes());
        buf[4..8].copy_from_slice(&IMAGE_HEADER_SIZE.to_le_bytes());
        buf[8] = self.version.major;
        buf[9] = self.version.minor;
        buf[10..12].copy_from_slice(&self.version.rev.to_le_bytes());
        buf[12..16].copy_from_slice(&self.version.build_num.to_le_bytes());
        buf[16..20].copy_from_slice(&self.payload_size.to_le_bytes());
        buf
    }
}

/// A versioned firmware image bound to one builder's artifacts.
///
/// Sequencing is enforced at runtime: generation requires a version, the
/// manifest requires a generated image. A partially initialized image can
/// never produce a manifest.
pub struct FirmwareImage {
    elf_path: PathBuf,
    img_path: PathBuf,
    manifest_path: PathBuf,
    version: Option<FirmwareVersion>,
    image_size: Option<u64>,
}

impl FirmwareImage {
    /// Bind an image to a builder's artifacts. Fails if the application
    /// binary is missing, which means the target was never built.
    pub fn new(builder: &FirmwareBuilder) -> Result<Self, ImageError> {
        let elf_path = builder.app_elf_path();
        if !elf_path.is_file() {
            return Err(ImageError::MissingBinary(elf_path));
        }

        Ok(Self {
            elf_path,
            img_path: builder.app_image_path(),
            manifest_path: builder.manifest_path(),
            version: None,
            image_size: None,
        })
    }
}

impl ImageOps for FirmwareImage {
    fn set_version(&mut self, version: &str) -> Result<(), ImageError> {
        let version: FirmwareVersion = version.parse()?;
        self.version = Some(version);
        Ok(())
    }

    fn generate(&mut self) -> Result<(), ImageError> {
        let version = self.version.ok_or(ImageError::VersionNotSet)?;

        let payload = std::fs::read(&self.elf_path).map_err(|source| ImageError::Read {
            path: self.elf_path.clone(),
            source,
        })?;
        let payload_size = u32::try_from(payload.len())
            .map_err(|_| ImageError::BinaryTooLarge(payload.len() as u64))?;

        let header = ImageHeader {
            version,
            payload_size,
        };
        let mut image = Vec::with_capacity(IMAGE_HEADER_SIZE as usize + payload.len());
        image.extend_from_slice(&header.encode());
        image.extend_from_slice(&payload);

        std::fs::write(&self.img_path, &image).map_err(|source| ImageError::Write {
            path: self.img_path.clone(),
            source,
        })?;

        self.image_size = Some(image.len() as u64);
        tracing::info!(
            "generated image {} ({} bytes, version {})",
            self.img_path.display(),
            image.len(),
            version
        );
        Ok(())
    }

    fn write_manifest(&mut self, target: &Target) -> Result<(), ImageError> {
        let version = self.version.ok_or(ImageError::VersionNotSet)?;
        let image_size = self.image_size.ok_or(ImageError::NotGenerated)?;

        let manifest = Manifest::new(target, version, &self.img_path, image_size);
        let json = serde_json::to_string_pretty(&manifest)?;
        std::fs::write(&self.manifest_path, json).map_err(|source| ImageError::Write {
            path: self.manifest_path.clone(),
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout_is_stable() {
        let header = ImageHeader {
            version: FirmwareVersion {
                major: 1,
                minor: 2,
                rev: 3,
                build_num: 4,
            },
            payload_size: 0x1000,
        };

        let bytes = header.encode();
        assert_eq!(&bytes[0..4], &IMAGE_MAGIC.to_le_bytes());
        assert_eq!(&bytes[4..8], &24u32.to_le_bytes());
        assert_eq!(bytes[8], 1);
        assert_eq!(bytes[9], 2);
        assert_eq!(&bytes[10..12], &3u16.to_le_bytes());
        assert_eq!(&bytes[12..16], &4u32.to_le_bytes());
        assert_eq!(&bytes[16..20], &0x1000u32.to_le_bytes());
        assert_eq!(&bytes[20..24], &[0u8; 4]);
    }
}
