//! Tasks runnable from the command line
//!
//! This module provides:
//! - The `Task` trait every task implements
//! - `FileSearchTask`, the shared validate/search/report flow of wildcard search tasks
//! - `TaskRegistry`, the name to task mapping built once at start-up
//! - The built-in tasks

mod help;
mod increment_assembly_version;
mod output_version;
mod sync_wix_version;

pub use help::HelpTask;
pub use increment_assembly_version::{IncrementAssemblyVersionArgs, IncrementAssemblyVersionTask};
pub use output_version::{OutputVersionArgs, OutputVersionSource, OutputVersionTask};
pub use sync_wix_version::{SyncWixVersionArgs, SyncWixVersionTask};

use crate::domain::{FileMatchResult, VersionApplySettings};
use crate::error::{ConfigError, TaskError};
use crate::output::{Notifier, TaskSummary};
use crate::search::{self, WildcardPattern};
use clap::{Args, CommandFactory, Parser};
use std::path::Path;

/// State shared with a running task
pub struct TaskContext<'a> {
    /// Registered tasks, for tasks that describe other tasks
    pub registry: &'a TaskRegistry,
    /// Receiver of user-facing results
    pub notifier: &'a mut dyn Notifier,
}

impl<'a> TaskContext<'a> {
    pub fn new(registry: &'a TaskRegistry, notifier: &'a mut dyn Notifier) -> Self {
        Self { registry, notifier }
    }
}

/// A unit of work selected by name on the command line
pub trait Task {
    /// Names the task answers to; the first is the primary name
    fn names(&self) -> &'static [&'static str];

    /// One-line description shown in the task list
    fn description(&self) -> &'static str;

    /// Argument help of the task
    fn usage(&self) -> String;

    /// Checks the argument set before the task runs
    fn validate(&self, args: &[String]) -> Result<(), ConfigError>;

    /// Runs the task; returns false when the task failed
    fn execute(&self, args: &[String], ctx: &mut TaskContext<'_>) -> Result<bool, TaskError>;

    /// Returns the primary name
    fn primary_name(&self) -> &'static str {
        self.names().first().copied().unwrap_or_default()
    }

    /// Returns the name and description for help output
    fn summary(&self) -> TaskSummary {
        TaskSummary::new(self.names(), self.description())
    }

    /// Returns true if `name` matches any task name, ignoring case
    fn answers_to(&self, name: &str) -> bool {
        self.names().iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

/// A task that handles each file matching a wildcard search pattern.
///
/// Run through [`validate_search`] and [`execute_search`]:
/// `validate → before_search → walk(file_match) → after_search`.
pub trait FileSearchTask {
    /// Command line arguments of the task
    type Args: Parser;

    /// Settings derived once before the search starts
    type Settings;

    /// Returns the raw search pattern from the arguments
    fn pattern(args: &Self::Args) -> &str;

    /// Task-specific argument checks, after the pattern has been checked
    fn check(&self, _args: &Self::Args) -> Result<(), String> {
        Ok(())
    }

    /// Derives the settings used for every matching file
    fn before_search(&self, args: Self::Args) -> Result<Self::Settings, TaskError>;

    /// Handles one matching file
    fn file_match(
        &self,
        path: &Path,
        settings: &Self::Settings,
        ctx: &mut TaskContext<'_>,
    ) -> Result<FileMatchResult, TaskError>;

    /// Runs after the search; receives and may override the search outcome
    fn after_search(
        &self,
        _settings: &Self::Settings,
        succeeded: bool,
        _ctx: &mut TaskContext<'_>,
    ) -> Result<bool, TaskError> {
        Ok(succeeded)
    }
}

/// Parses a task's arguments with its clap definition
pub fn parse_args<A: Parser>(name: &str, args: &[String]) -> Result<A, ConfigError> {
    A::try_parse_from(std::iter::once(name).chain(args.iter().map(String::as_str)))
        .map_err(|e| ConfigError::invalid_arguments(name, e.to_string().trim_end()))
}

/// Renders the clap help of an argument definition under the task's name
pub fn render_usage<A: CommandFactory>(name: &'static str) -> String {
    A::command()
        .name(name)
        .bin_name(format!("buildtask {}", name))
        .render_help()
        .to_string()
}

/// Parses and checks the arguments of a search task
pub fn validate_search<T: FileSearchTask>(
    task: &T,
    name: &str,
    args: &[String],
) -> Result<T::Args, ConfigError> {
    let parsed: T::Args = parse_args(name, args)?;

    WildcardPattern::parse_absolute(T::pattern(&parsed))
        .map_err(|e| ConfigError::invalid_arguments(name, e.to_string()))?;

    task.check(&parsed)
        .map_err(|message| ConfigError::invalid_arguments(name, message))?;

    Ok(parsed)
}

/// Runs a search task over every file matching its pattern
pub fn execute_search<T: FileSearchTask>(
    task: &T,
    name: &str,
    args: &[String],
    ctx: &mut TaskContext<'_>,
) -> Result<bool, TaskError> {
    let parsed = validate_search(task, name, args)?;
    let pattern = WildcardPattern::parse_absolute(T::pattern(&parsed))?;
    let settings = task.before_search(parsed)?;

    let succeeded = search::search(&pattern, |path| task.file_match(path, &settings, ctx))?;

    task.after_search(&settings, succeeded, ctx)
}

/// Version component flags shared by tasks that touch version components
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ComponentArgs {
    /// Include the major number
    #[arg(short = 'M', long)]
    pub major: bool,

    /// Include the minor number
    #[arg(short = 'm', long)]
    pub minor: bool,

    /// Include the build number
    #[arg(short = 'b', long)]
    pub build: bool,

    /// Include the revision number
    #[arg(short = 'r', long)]
    pub revision: bool,
}

impl ComponentArgs {
    /// Converts the flags to apply settings
    pub fn settings(&self) -> VersionApplySettings {
        VersionApplySettings::new(self.major, self.minor, self.build, self.revision)
    }

    /// Rejects an argument set that selects no component
    pub fn check(&self) -> Result<(), String> {
        if self.settings().any() {
            Ok(())
        } else {
            Err("at least one of --major, --minor, --build or --revision is required".to_string())
        }
    }
}

/// Registered tasks, looked up by name
#[derive(Default)]
pub struct TaskRegistry {
    tasks: Vec<Box<dyn Task>>,
}

impl TaskRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in task
    pub fn with_defaults() -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.register(Box::new(HelpTask))?;
        registry.register(Box::new(IncrementAssemblyVersionTask))?;
        registry.register(Box::new(SyncWixVersionTask))?;
        registry.register(Box::new(OutputVersionTask::binary()))?;
        registry.register(Box::new(OutputVersionTask::wix()))?;
        Ok(registry)
    }

    /// Adds a task; fails if any of its names is already taken
    pub fn register(&mut self, task: Box<dyn Task>) -> Result<(), ConfigError> {
        if let Some(name) = task.names().iter().find(|name| self.resolve(name).is_some()) {
            return Err(ConfigError::DuplicateTaskName {
                name: name.to_string(),
            });
        }

        self.tasks.push(task);
        Ok(())
    }

    /// Finds the task answering to `name`, ignoring case
    pub fn resolve(&self, name: &str) -> Option<&dyn Task> {
        self.tasks
            .iter()
            .find(|task| task.answers_to(name))
            .map(|task| task.as_ref())
    }

    /// Returns every registered task in registration order
    pub fn tasks(&self) -> impl Iterator<Item = &dyn Task> {
        self.tasks.iter().map(|task| task.as_ref())
    }

    /// Returns the help summary of every registered task
    pub fn summaries(&self) -> Vec<TaskSummary> {
        self.tasks().map(|task| task.summary()).collect()
    }
}
