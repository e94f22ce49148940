//! `AssemblyVersion` attributes in C# source files
//!
//! Handles declarations like:
//! - `[assembly: AssemblyVersion("1.0.0.0")]`
//! - `[assembly: AssemblyVersion("2.1.*")]`
//!
//! Only the version text inside the quotes is rewritten. The rest of the
//! file, including its encoding, is left as it was.

use super::{text_file, VersionManager, VersionManagerKind};
use crate::domain::Version;
use crate::error::ManagerError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Attribute declaration at the start of a line; `version` captures the quoted text
static ASSEMBLY_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^[ \t]*\[assembly:\s*AssemblyVersion\("(?P<version>\d+\.\d+(?:\.(?:\d+|\*))?(?:\.(?:\d+|\*))?)"\)\]"#,
    )
    .unwrap()
});

/// Reads and rewrites the assembly version of C# source files
pub struct AssemblyInfoVersionManager;

impl VersionManager for AssemblyInfoVersionManager {
    fn read_version(&self, path: &Path) -> Result<Option<Version>, ManagerError> {
        let file = text_file::read_text(path)?;
        match find_version(&file.content) {
            Some(text) => Ok(Version::parse(text).ok()),
            None => {
                debug!("No AssemblyVersion attribute found in '{}'", path.display());
                Ok(None)
            }
        }
    }

    fn write_version(&self, path: &Path, version: &Version) -> Result<(), ManagerError> {
        let file = text_file::read_text(path)?;
        match replace_version(&file.content, version) {
            Some(updated) => text_file::write_text(path, &updated, file.encoding),
            None => {
                debug!("No AssemblyVersion attribute to update in '{}'", path.display());
                Ok(())
            }
        }
    }

    fn kind(&self) -> VersionManagerKind {
        VersionManagerKind::AssemblyInfo
    }
}

/// Returns the version text of the first attribute in `content`
pub fn find_version(content: &str) -> Option<&str> {
    ASSEMBLY_VERSION_RE
        .captures(content)
        .and_then(|caps| caps.name("version"))
        .map(|m| m.as_str())
}

/// Replaces the version text of the first attribute, keeping wildcards.
///
/// Returns `None` when the content has no attribute.
pub fn replace_version(content: &str, version: &Version) -> Option<String> {
    let span = ASSEMBLY_VERSION_RE.captures(content)?.name("version")?.range();

    let mut updated = String::with_capacity(content.len());
    updated.push_str(&content[..span.start]);
    updated.push_str(&version.format(true));
    updated.push_str(&content[span.end..]);
    Some(updated)
}
