//! Product version of compiled binaries
//!
//! The version comes from the `VS_FIXEDFILEINFO` block embedded in the
//! version resource of PE files (`.exe`, `.dll`). Binaries are never
//! rewritten.

use super::{VersionManager, VersionManagerKind};
use crate::domain::Version;
use crate::error::ManagerError;
use std::fs;
use std::path::Path;
use tracing::debug;

/// `dwSignature` followed by `dwStrucVersion`, both little-endian
const FIXED_FILE_INFO_HEADER: [u8; 8] = [0xBD, 0x04, 0xEF, 0xFE, 0x00, 0x00, 0x01, 0x00];

/// Length of the block: 13 DWORDs
const FIXED_FILE_INFO_LEN: usize = 52;

/// Offset of `dwProductVersionMS` within the block
const PRODUCT_VERSION_OFFSET: usize = 16;

/// Reads product versions from compiled binaries
pub struct BinaryVersionManager;

impl VersionManager for BinaryVersionManager {
    fn read_version(&self, path: &Path) -> Result<Option<Version>, ManagerError> {
        if !path.is_file() {
            debug!("Binary '{}' does not exist", path.display());
            return Ok(None);
        }

        let bytes = fs::read(path).map_err(|e| ManagerError::read_error(path, e))?;
        let version = read_product_version(&bytes);
        if version.is_none() {
            debug!("No version resource found in '{}'", path.display());
        }

        Ok(version)
    }

    fn write_version(&self, _path: &Path, _version: &Version) -> Result<(), ManagerError> {
        Err(ManagerError::UnsupportedOperation {
            manager: "binary",
            operation: "writing versions",
        })
    }

    fn kind(&self) -> VersionManagerKind {
        VersionManagerKind::Binary
    }
}

/// Extracts the product version from the first fixed file info block in `bytes`
pub fn read_product_version(bytes: &[u8]) -> Option<Version> {
    let start = bytes
        .windows(FIXED_FILE_INFO_HEADER.len())
        .position(|window| window == FIXED_FILE_INFO_HEADER)?;

    let block = bytes.get(start..start + FIXED_FILE_INFO_LEN)?;
    let product_ms = read_u32(block, PRODUCT_VERSION_OFFSET)?;
    let product_ls = read_u32(block, PRODUCT_VERSION_OFFSET + 4)?;

    Some(Version::new(
        product_ms >> 16,
        product_ms & 0xFFFF,
        product_ls >> 16,
        product_ls & 0xFFFF,
    ))
}

fn read_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(offset..offset + 4)?.try_into().ok()?;
    Some(u32::from_le_bytes(raw))
}
