//! Task executor for running one task from a command line
//!
//! This module provides:
//! - Task resolution by name through the registry
//! - Argument validation with help output on rejection
//! - Conversion of every task error into a logged failure

use crate::output::Notifier;
use crate::task::{HelpTask, Task, TaskContext, TaskRegistry};
use tracing::{error, info};

/// Runs tasks selected by name
pub struct TaskExecutor {
    registry: TaskRegistry,
}

impl TaskExecutor {
    /// Create an executor over the given registry
    pub fn new(registry: TaskRegistry) -> Self {
        Self { registry }
    }

    /// Runs the task named by the first argument with the remaining arguments.
    ///
    /// Returns true only if the task ran and succeeded.
    pub fn execute(&self, args: &[String], notifier: &mut dyn Notifier) -> bool {
        let mut ctx = TaskContext::new(&self.registry, notifier);

        let Some((name, task_args)) = args.split_first() else {
            error!("No task was specified");
            self.show_help(&[], &mut ctx);
            return false;
        };

        let Some(task) = self.registry.resolve(name) else {
            error!("No task found matching '{}'", name);
            return false;
        };

        let primary = task.primary_name();
        let is_help = task.answers_to(HelpTask.primary_name());
        if !is_help {
            info!("Executing task {}", primary);
        }

        if let Err(e) = task.validate(task_args) {
            error!("Invalid arguments for task {}: {}", primary, e);
            self.show_help(&[name.clone()], &mut ctx);
            return false;
        }

        match task.execute(task_args, &mut ctx) {
            Ok(succeeded) => {
                if !succeeded && !is_help {
                    error!("Task {} failed", primary);
                }
                succeeded
            }
            Err(e) => {
                error!("Task {} failed: {:#}", primary, anyhow::Error::from(e));
                false
            }
        }
    }

    fn show_help(&self, args: &[String], ctx: &mut TaskContext<'_>) {
        if let Err(e) = HelpTask.execute(args, ctx) {
            error!("Failed to show help: {:#}", anyhow::Error::from(e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::TextNotifier;
    use std::fs;
    use tempfile::TempDir;

    fn run(values: &[&str]) -> (bool, String) {
        let executor = TaskExecutor::new(TaskRegistry::with_defaults().unwrap());
        let mut notifier = TextNotifier::with_color(Vec::new(), false);
        let args: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let result = executor.execute(&args, &mut notifier);
        (result, String::from_utf8(notifier.into_inner()).unwrap())
    }

    #[test]
    fn test_no_arguments_shows_help_and_fails() {
        let (result, output) = run(&[]);
        assert!(!result);
        assert!(output.contains("Available tasks:"));
    }

    #[test]
    fn test_unknown_task_fails() {
        let (result, output) = run(&["Frobnicate"]);
        assert!(!result);
        assert!(output.is_empty());
    }

    #[test]
    fn test_help_task_succeeds() {
        let (result, output) = run(&["/?"]);
        assert!(result);
        assert!(output.contains("IncrementAssemblyVersion (iav)"));
    }

    #[test]
    fn test_invalid_arguments_show_task_help() {
        let (result, output) = run(&["iav", "--pattern", "*.cs", "--build"]);
        assert!(!result);
        assert!(output.starts_with("IncrementAssemblyVersion (iav)"));
    }

    #[test]
    fn test_task_error_becomes_failure() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Broken.csproj"), "<Project>").unwrap();
        let pattern = format!("{}/*.csproj", dir.path().display());
        let (result, _) = run(&["bov", "--pattern", &pattern]);
        assert!(!result);
    }

    #[test]
    fn test_runs_resolved_task() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("AssemblyInfo.cs");
        fs::write(&path, "[assembly: AssemblyVersion(\"1.2.3.4\")]").unwrap();
        let pattern = format!("{}/*.cs", dir.path().display());

        let (result, output) = run(&["IAV", "--pattern", &pattern, "--revision"]);

        assert!(result);
        assert!(output.contains("1.2.3.4 -> 1.2.3.5"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[assembly: AssemblyVersion(\"1.2.3.5\")]"
        );
    }
}
