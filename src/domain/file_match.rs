//! Outcome of processing one file found by a wildcard search

use std::fmt;

/// Tells the search walk what to do after a file has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileMatchResult {
    /// Proceed to the next matching file
    #[default]
    Continue,
    /// Stop searching; the task succeeds
    Cancel,
    /// Stop searching; the task fails
    FailTask,
}

impl FileMatchResult {
    /// Returns true if the walk should stop after this result
    pub fn stops_search(&self) -> bool {
        !matches!(self, FileMatchResult::Continue)
    }
}

impl fmt::Display for FileMatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileMatchResult::Continue => write!(f, "continue"),
            FileMatchResult::Cancel => write!(f, "cancel"),
            FileMatchResult::FailTask => write!(f, "fail task"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_continue() {
        assert_eq!(FileMatchResult::default(), FileMatchResult::Continue);
    }

    #[test]
    fn test_stops_search() {
        assert!(!FileMatchResult::Continue.stops_search());
        assert!(FileMatchResult::Cancel.stops_search());
        assert!(FileMatchResult::FailTask.stops_search());
    }
}
