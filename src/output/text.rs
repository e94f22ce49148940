//! Text notifier for human-readable display

use super::{Notifier, TaskSummary};
use crate::domain::Version;
use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;

/// Writes notifications as plain or coloured text
pub struct TextNotifier<W: Write> {
    writer: W,
    /// Whether to use colors
    color: bool,
}

impl<W: Write> TextNotifier<W> {
    /// Create a new text notifier with color option
    pub fn with_color(writer: W, color: bool) -> Self {
        Self { writer, color }
    }

    /// Consumes the notifier and returns the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn old_version(&self, version: &Version) -> String {
        let text = version.format(true);
        if self.color {
            text.red().to_string()
        } else {
            text
        }
    }

    fn new_version(&self, version: &Version) -> String {
        let text = version.format(true);
        if self.color {
            text.green().bold().to_string()
        } else {
            text
        }
    }

    fn arrow(&self) -> String {
        if self.color {
            "→".dimmed().to_string()
        } else {
            "->".to_string()
        }
    }

    fn task_names(&self, task: &TaskSummary) -> String {
        let primary = task.primary_name();
        let aliases = task.names.iter().skip(1).cloned().collect::<Vec<_>>().join(", ");

        let primary = if self.color {
            primary.cyan().bold().to_string()
        } else {
            primary.to_string()
        };

        if aliases.is_empty() {
            primary
        } else {
            format!("{} ({})", primary, aliases)
        }
    }
}

impl<W: Write> Notifier for TextNotifier<W> {
    fn version_updated(&mut self, path: &Path, old: &Version, new: &Version) -> io::Result<()> {
        let line = format!(
            "{}: {} {} {}",
            path.display(),
            self.old_version(old),
            self.arrow(),
            self.new_version(new)
        );
        writeln!(self.writer, "{}", line)
    }

    fn output_renamed(&mut self, from: &Path, to: &Path, copied: bool) -> io::Result<()> {
        let action = if copied { "Copied" } else { "Moved" };
        let action = if self.color {
            action.yellow().to_string()
        } else {
            action.to_string()
        };
        let line = format!(
            "{} {} {} {}",
            action,
            from.display(),
            self.arrow(),
            to.display()
        );
        writeln!(self.writer, "{}", line)
    }

    fn task_list(&mut self, tasks: &[TaskSummary]) -> io::Result<()> {
        writeln!(self.writer, "Usage: buildtask [OPTIONS] <TASK> [ARGS]...")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Available tasks:")?;

        for task in tasks {
            let names = self.task_names(task);
            writeln!(self.writer, "  {}", names)?;
            writeln!(self.writer, "      {}", task.description)?;
        }

        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Run 'buildtask help <TASK>' for the arguments of a task."
        )
    }

    fn task_help(&mut self, task: &TaskSummary, usage: &str) -> io::Result<()> {
        let names = self.task_names(task);
        writeln!(self.writer, "{}", names)?;
        writeln!(self.writer, "{}", task.description)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", usage.trim_end())
    }
}
