//! Four-part version numbers with unspecified trailing components
//!
//! Handles version text like:
//! - `1.2`, `1.2.3`, `1.2.3.4`
//! - `1.2.*` (build and revision unspecified)
//! - `1.2.3.*` (revision unspecified)

use super::VersionApplySettings;
use crate::error::VersionError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Leading `major.minor[.build|*][.revision|*]`, anchored at the start only
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<major>\d+)\.(?P<minor>\d+)(?:\.(?P<build>\d+|\*))?(?:\.(?P<revision>\d+|\*))?")
        .unwrap()
});

/// A version number of two to four components.
///
/// `None` marks an unspecified component. Unspecified components are
/// always trailing: a revision is never present without a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    major: u32,
    minor: u32,
    build: Option<u32>,
    revision: Option<u32>,
}

impl Version {
    /// Creates a version, truncating at the first unspecified component
    pub fn create(major: u32, minor: u32, build: Option<u32>, revision: Option<u32>) -> Self {
        match build {
            Some(build) => Self {
                major,
                minor,
                build: Some(build),
                revision,
            },
            None => Self {
                major,
                minor,
                build: None,
                revision: None,
            },
        }
    }

    /// Creates a fully specified version
    pub fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self::create(major, minor, Some(build), Some(revision))
    }

    /// Parses the version at the start of `text`.
    ///
    /// Anything after a valid version prefix is ignored.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let caps = VERSION_RE
            .captures(text)
            .ok_or_else(|| VersionError::invalid_format(text))?;

        let major = parse_component(text, &caps["major"])?;
        let minor = parse_component(text, &caps["minor"])?;
        let build = match caps.name("build") {
            Some(m) => parse_optional_component(text, m.as_str())?,
            None => None,
        };
        let revision = match caps.name("revision") {
            Some(m) => parse_optional_component(text, m.as_str())?,
            None => None,
        };

        Ok(Self::create(major, minor, build, revision))
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn build(&self) -> Option<u32> {
        self.build
    }

    pub fn revision(&self) -> Option<u32> {
        self.revision
    }

    /// Renders the version text.
    ///
    /// With `include_wildcards` the first unspecified component is written
    /// as `*`, otherwise it is left out.
    pub fn format(&self, include_wildcards: bool) -> String {
        match (self.build, self.revision) {
            (None, _) if include_wildcards => format!("{}.{}.*", self.major, self.minor),
            (None, _) => format!("{}.{}", self.major, self.minor),
            (Some(build), None) if include_wildcards => {
                format!("{}.{}.{}.*", self.major, self.minor, build)
            }
            (Some(build), None) => format!("{}.{}.{}", self.major, self.minor, build),
            (Some(build), Some(revision)) => {
                format!("{}.{}.{}.{}", self.major, self.minor, build, revision)
            }
        }
    }

    /// Returns a new version with every selected component increased by one.
    ///
    /// Unspecified components stay unspecified, so `1.2.*` with the build
    /// selected is still `1.2.*`. Components saturate at `u32::MAX`.
    pub fn increment(&self, settings: &VersionApplySettings) -> Self {
        let bump = |value: u32, apply: bool| {
            if apply {
                value.saturating_add(1)
            } else {
                value
            }
        };

        Self::create(
            bump(self.major, settings.apply_major),
            bump(self.minor, settings.apply_minor),
            self.build.map(|b| bump(b, settings.apply_build)),
            self.revision.map(|r| bump(r, settings.apply_revision)),
        )
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Renders an optional version, using an empty string for `None`
pub fn format_version(version: Option<&Version>, include_wildcards: bool) -> String {
    version
        .map(|v| v.format(include_wildcards))
        .unwrap_or_default()
}

fn parse_component(text: &str, part: &str) -> Result<u32, VersionError> {
    part.parse()
        .map_err(|_| VersionError::component_out_of_range(text, part))
}

fn parse_optional_component(text: &str, part: &str) -> Result<Option<u32>, VersionError> {
    if part == "*" {
        return Ok(None);
    }
    parse_component(text, part).map(Some)
}
