//! User-facing output of task results
//!
//! This module provides:
//! - Before/after notifications for version updates
//! - Notifications for renamed or copied build output
//! - Task listings and per-task argument help
//!
//! Diagnostics go through `tracing` to stderr. Everything here goes to stdout.

mod text;

pub use text::TextNotifier;

use crate::domain::Version;
use std::io;
use std::path::Path;

/// Name and description of a registered task, as shown in help output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
    /// Task names; the first is the primary name
    pub names: Vec<String>,
    pub description: String,
}

impl TaskSummary {
    pub fn new(names: &[&str], description: &str) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            description: description.to_string(),
        }
    }

    /// Returns the primary name
    pub fn primary_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }
}

/// Receives the results a task reports while it runs
pub trait Notifier {
    /// A file's version was changed
    fn version_updated(&mut self, path: &Path, old: &Version, new: &Version) -> io::Result<()>;

    /// A build output file was moved or copied to a versioned name
    fn output_renamed(&mut self, from: &Path, to: &Path, copied: bool) -> io::Result<()>;

    /// Lists every available task
    fn task_list(&mut self, tasks: &[TaskSummary]) -> io::Result<()>;

    /// Shows the argument help of a single task
    fn task_help(&mut self, task: &TaskSummary, usage: &str) -> io::Result<()>;
}
