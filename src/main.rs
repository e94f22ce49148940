//! buildtask - Build pipeline task runner CLI tool
//!
//! Runs one named task per invocation:
//! - IncrementAssemblyVersion (iav)
//! - SyncWixVersion (swv)
//! - BinaryOutputVersion (bov)
//! - WixOutputVersion (wov)
//! - Help (/?)

use buildtask::cli::CliArgs;
use buildtask::executor::TaskExecutor;
use buildtask::logging;
use buildtask::output::TextNotifier;
use buildtask::task::TaskRegistry;
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Handle errors outside of task execution
    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let color = args.use_color();
    colored::control::set_override(color);
    logging::init(args.event_level, color);

    let executor = TaskExecutor::new(TaskRegistry::with_defaults()?);

    let stdout = io::stdout().lock();
    let mut notifier = TextNotifier::with_color(stdout, color);
    let succeeded = executor.execute(&args.task_line, &mut notifier);
    notifier.into_inner().flush()?;

    if succeeded {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
