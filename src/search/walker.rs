//! Recursive directory walk driving a per-file handler

use super::WildcardPattern;
use crate::domain::FileMatchResult;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Searches the pattern's base directory and calls `handler` for every matching file.
///
/// Returns `Ok(true)` when the walk completes or is cancelled, `Ok(false)` when
/// the base directory does not exist or a handler fails the task. Handler
/// errors stop the walk and are returned as-is.
pub fn search<F, E>(pattern: &WildcardPattern, handler: F) -> Result<bool, E>
where
    F: FnMut(&Path) -> Result<FileMatchResult, E>,
{
    walk(pattern.base_directory(), |path| pattern.is_match(path), handler)
}

/// Walks every file below `base_directory`, in no particular order
pub fn walk<P, F, E>(base_directory: &Path, predicate: P, mut handler: F) -> Result<bool, E>
where
    P: Fn(&Path) -> bool,
    F: FnMut(&Path) -> Result<FileMatchResult, E>,
{
    if !base_directory.is_dir() {
        warn!("Directory '{}' was not found", base_directory.display());
        return Ok(false);
    }

    info!("Searching directory '{}'", base_directory.display());

    for entry in WalkDir::new(base_directory) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        // Symlinks are not followed by the walk, so a linked file needs its target checked.
        let is_file = entry.file_type().is_file() || (entry.path_is_symlink() && path.is_file());
        if !is_file || !predicate(path) {
            continue;
        }

        debug!("File '{}' matches the search pattern", path.display());

        let result = handler(path)?;
        if result.stops_search() {
            debug!("Search stopped at '{}' ({})", path.display(), result);
            return Ok(result == FileMatchResult::Cancel);
        }
    }

    Ok(true)
}
