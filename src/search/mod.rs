//! Wildcard file search
//!
//! This module provides:
//! - Base directory derivation and predicate compilation for `*` patterns
//! - A recursive walk that hands each matching file to a caller-supplied handler
//! - Early termination through `FileMatchResult::Cancel` and `FileMatchResult::FailTask`

mod pattern;
mod walker;

pub use pattern::{compile_predicate, parse_base_directory, WildcardPattern, WILDCARD};
pub use walker::{search, walk};
