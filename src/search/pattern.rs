//! Wildcard search patterns
//!
//! A pattern is an absolute path that may contain `*` wildcards. It splits into:
//! - a base directory: the literal prefix up to the last separator before the first `*`
//! - a predicate: an anchored expression where each `*` matches any run of characters
//!
//! A wildcard is not limited to one path segment. `C:\Temp\Some*\Path\output.txt`
//! matches `C:\Temp\Some\NestedDirectory\Path\output.txt` as well as
//! `C:\Temp\SomeCustom\Path\output.txt`.

use crate::error::PatternError;
use regex::{Regex, RegexBuilder};
use std::path::{Path, PathBuf};

/// The only supported wildcard character
pub const WILDCARD: char = '*';

/// Both separators are accepted so Windows-style patterns resolve on any host
fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// A compiled wildcard search pattern
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    /// The raw pattern text
    raw: String,
    /// Directory the search starts from
    base_directory: PathBuf,
    /// Expression candidate paths must match in full
    expression: Regex,
}

impl WildcardPattern {
    /// Compiles a pattern without checking that its base directory is absolute
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if pattern.trim().is_empty() {
            return Err(PatternError::Empty);
        }

        let base = parse_base_directory(pattern).ok_or_else(|| PatternError::NoBaseDirectory {
            pattern: pattern.to_string(),
        })?;

        Ok(Self {
            raw: pattern.to_string(),
            base_directory: PathBuf::from(base),
            expression: compile_predicate(pattern)?,
        })
    }

    /// Compiles a pattern and requires an absolute base directory.
    ///
    /// This is the check tasks run on their arguments before searching.
    pub fn parse_absolute(pattern: &str) -> Result<Self, PatternError> {
        let parsed = Self::parse(pattern)?;
        if !parsed.base_directory.is_absolute() {
            return Err(PatternError::NotAbsolute {
                pattern: pattern.to_string(),
            });
        }
        Ok(parsed)
    }

    /// Returns the raw pattern text
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the directory the search starts from
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Returns true if the whole path matches the pattern
    pub fn is_match(&self, path: &Path) -> bool {
        self.expression.is_match(&path.to_string_lossy())
    }
}

/// Derives the base directory of a pattern.
///
/// Returns `None` when no directory separator precedes the first wildcard.
pub fn parse_base_directory(pattern: &str) -> Option<&str> {
    if pattern.trim().is_empty() {
        return None;
    }

    let head = match pattern.find(WILDCARD) {
        Some(index) => &pattern[..index],
        None => pattern,
    };

    let last_separator = head.rfind(is_separator)?;
    Some(&head[..=last_separator])
}

/// Builds the anchored expression for a pattern
pub fn compile_predicate(pattern: &str) -> Result<Regex, PatternError> {
    let body = pattern
        .split(WILDCARD)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    RegexBuilder::new(&format!("^{}$", body))
        .dot_matches_new_line(true)
        .case_insensitive(cfg!(windows))
        .build()
        .map_err(|e| PatternError::InvalidExpression {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}
