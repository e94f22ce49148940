//! Version managers for the file formats that carry version numbers
//!
//! This module provides managers for:
//! - C# source files (`AssemblyVersion` attributes)
//! - Wix installer projects (product version, including build variables)
//! - Compiled binaries (product version, read-only)

mod assembly_info;
mod binary;
pub mod text_file;
mod wix;
pub mod wix_resolver;

pub use assembly_info::AssemblyInfoVersionManager;
pub use binary::{read_product_version, BinaryVersionManager};
pub use wix::WixVersionManager;

use crate::domain::Version;
use crate::error::ManagerError;
use std::fmt;
use std::path::Path;

/// Identifies a version manager implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionManagerKind {
    Binary,
    AssemblyInfo,
    Wix,
}

impl fmt::Display for VersionManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionManagerKind::Binary => write!(f, "binary"),
            VersionManagerKind::AssemblyInfo => write!(f, "assembly info"),
            VersionManagerKind::Wix => write!(f, "wix"),
        }
    }
}

/// Reads and writes the version number held by a file
pub trait VersionManager {
    /// Reads the version held by `path`.
    ///
    /// `Ok(None)` means no version could be determined, which is not an error.
    fn read_version(&self, path: &Path) -> Result<Option<Version>, ManagerError>;

    /// Writes `version` into `path`
    fn write_version(&self, path: &Path, version: &Version) -> Result<(), ManagerError>;

    /// Returns the kind of this manager
    fn kind(&self) -> VersionManagerKind;
}

/// Get a version manager of the specified kind
pub fn get_manager(kind: VersionManagerKind) -> Box<dyn VersionManager> {
    match kind {
        VersionManagerKind::Binary => Box::new(BinaryVersionManager),
        VersionManagerKind::AssemblyInfo => Box::new(AssemblyInfoVersionManager),
        VersionManagerKind::Wix => Box::new(WixVersionManager),
    }
}
