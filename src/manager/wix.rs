//! Product versions of Wix installer projects

use super::wix_resolver::{self, LocationKind};
use super::{VersionManager, VersionManagerKind};
use crate::domain::Version;
use crate::error::ManagerError;
use std::path::Path;
use tracing::debug;

/// Reads and rewrites the product version of Wix projects
pub struct WixVersionManager;

impl VersionManager for WixVersionManager {
    fn read_version(&self, path: &Path) -> Result<Option<Version>, ManagerError> {
        let Some(location) = wix_resolver::resolve(path)? else {
            debug!("Product version not found for '{}'", path.display());
            return Ok(None);
        };

        if !location.has_version() {
            if let LocationKind::Definition { definition } = &location.kind {
                debug!("Wix variable definition '{}' has no version number", definition);
            }
            return Ok(None);
        }

        Ok(Version::parse(location.text()).ok())
    }

    fn write_version(&self, path: &Path, version: &Version) -> Result<(), ManagerError> {
        match wix_resolver::resolve(path)? {
            Some(location) => location.write(&version.format(false)),
            None => {
                debug!("Product version not found for '{}'", path.display());
                Ok(())
            }
        }
    }

    fn kind(&self) -> VersionManagerKind {
        VersionManagerKind::Wix
    }
}
