//! Help task

use super::{parse_args, render_usage, Task, TaskContext};
use crate::error::{ConfigError, TaskError};
use clap::Parser;
use tracing::error;

const NAMES: &[&str] = &["Help", "/?"];

/// Arguments of the Help task
#[derive(Parser, Debug, Clone)]
#[command(about = "Displays help information about the available tasks")]
pub struct HelpArgs {
    /// Task to show the arguments of; lists every task when omitted
    pub task: Option<String>,
}

/// Lists the available tasks or describes one of them
pub struct HelpTask;

impl Task for HelpTask {
    fn names(&self) -> &'static [&'static str] {
        NAMES
    }

    fn description(&self) -> &'static str {
        "Displays help information about the available tasks"
    }

    fn usage(&self) -> String {
        render_usage::<HelpArgs>(self.primary_name())
    }

    fn validate(&self, args: &[String]) -> Result<(), ConfigError> {
        parse_args::<HelpArgs>(self.primary_name(), args).map(|_| ())
    }

    fn execute(&self, args: &[String], ctx: &mut TaskContext<'_>) -> Result<bool, TaskError> {
        let args: HelpArgs = parse_args(self.primary_name(), args)?;

        let Some(name) = args.task else {
            let mut tasks = ctx.registry.summaries();
            tasks.sort_by(|a, b| a.primary_name().cmp(b.primary_name()));
            ctx.notifier.task_list(&tasks)?;
            return Ok(true);
        };

        match ctx.registry.resolve(&name) {
            Some(task) => {
                ctx.notifier.task_help(&task.summary(), &task.usage())?;
                Ok(true)
            }
            None => {
                error!("No task found matching '{}'", name);
                Ok(false)
            }
        }
    }
}
