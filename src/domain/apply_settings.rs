//! Version component selection

use super::Version;
use crate::error::VersionError;

/// Selects which version components an operation touches.
///
/// Used both to increment components and to copy components from a
/// source version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionApplySettings {
    pub apply_major: bool,
    pub apply_minor: bool,
    pub apply_build: bool,
    pub apply_revision: bool,
}

impl VersionApplySettings {
    /// Creates new settings
    pub fn new(apply_major: bool, apply_minor: bool, apply_build: bool, apply_revision: bool) -> Self {
        Self {
            apply_major,
            apply_minor,
            apply_build,
            apply_revision,
        }
    }

    /// Returns true if at least one component is selected
    pub fn any(&self) -> bool {
        self.apply_major || self.apply_minor || self.apply_build || self.apply_revision
    }

    /// Joins the selected components of `source` with dots, in component order.
    ///
    /// Selection stops at the first unspecified component of `source`.
    pub fn assemble_text(&self, source: &Version) -> String {
        let components = [
            (self.apply_major, Some(source.major())),
            (self.apply_minor, Some(source.minor())),
            (self.apply_build, source.build()),
            (self.apply_revision, source.revision()),
        ];

        components
            .iter()
            .filter(|(apply, _)| *apply)
            .map_while(|(_, value)| *value)
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Builds a new version from the selected components of `source`
    pub fn assemble(&self, source: &Version) -> Result<Version, VersionError> {
        Version::parse(&self.assemble_text(source))
    }
}
