//! CLI argument parsing module for buildtask

use clap::{Parser, ValueEnum};

/// Minimum severity of diagnostic events written to stderr
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventLevel {
    Critical,
    Error,
    Warning,
    #[default]
    Information,
    Verbose,
}

/// Build pipeline task runner
#[derive(Parser, Debug, Clone)]
#[command(
    name = "buildtask",
    version,
    about = "Build pipeline task runner for wildcard file search and version stamping",
    after_help = "Run 'buildtask help' to list the available tasks."
)]
pub struct CliArgs {
    /// Minimum level of events to write
    #[arg(long, value_enum, default_value_t = EventLevel::Information)]
    pub event_level: EventLevel,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Task name followed by the task's own arguments
    #[arg(value_name = "TASK", trailing_var_arg = true, allow_hyphen_values = true)]
    pub task_line: Vec<String>,
}

impl CliArgs {
    /// Returns true if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::env::var_os("NO_COLOR").is_none()
    }
}
