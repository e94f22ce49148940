//! SyncWixVersion task

use super::{
    execute_search, render_usage, validate_search, ComponentArgs, FileSearchTask, Task,
    TaskContext,
};
use crate::domain::{FileMatchResult, VersionApplySettings};
use crate::error::{ConfigError, TaskError};
use crate::manager::{get_manager, VersionManagerKind};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::error;

const NAMES: &[&str] = &["SyncWixVersion", "swv"];

/// Arguments of the SyncWixVersion task
#[derive(Parser, Debug, Clone)]
#[command(about = "Synchronizes the product version in a Wix project to the version of a binary file")]
pub struct SyncWixVersionArgs {
    /// Absolute file search pattern of the Wix projects to synchronize; may contain * wildcards
    #[arg(long)]
    pub pattern: String,

    /// Binary file to take the version number from
    #[arg(long)]
    pub source: PathBuf,

    #[command(flatten)]
    pub components: ComponentArgs,
}

/// Settings captured before the search
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub components: VersionApplySettings,
    pub source: PathBuf,
}

/// Copies selected components of a binary's product version into Wix projects
pub struct SyncWixVersionTask;

impl FileSearchTask for SyncWixVersionTask {
    type Args = SyncWixVersionArgs;
    type Settings = SyncSettings;

    fn pattern(args: &Self::Args) -> &str {
        &args.pattern
    }

    fn check(&self, args: &Self::Args) -> Result<(), String> {
        if !args.source.is_file() {
            return Err(format!("source file '{}' was not found", args.source.display()));
        }
        args.components.check()
    }

    fn before_search(&self, args: Self::Args) -> Result<Self::Settings, TaskError> {
        Ok(SyncSettings {
            components: args.components.settings(),
            source: args.source,
        })
    }

    fn file_match(
        &self,
        path: &Path,
        settings: &Self::Settings,
        ctx: &mut TaskContext<'_>,
    ) -> Result<FileMatchResult, TaskError> {
        let wix = get_manager(VersionManagerKind::Wix);
        let binary = get_manager(VersionManagerKind::Binary);

        let Some(current) = wix.read_version(path)? else {
            error!("No product version found in '{}'", path.display());
            return Ok(FileMatchResult::FailTask);
        };

        let Some(source) = binary.read_version(&settings.source)? else {
            error!("No version found in source binary '{}'", settings.source.display());
            return Ok(FileMatchResult::FailTask);
        };

        let updated = match settings.components.assemble(&source) {
            Ok(version) => version,
            Err(e) => {
                error!("Cannot build a version for '{}': {}", path.display(), e);
                return Ok(FileMatchResult::FailTask);
            }
        };

        ctx.notifier.version_updated(path, &current, &updated)?;
        wix.write_version(path, &updated)?;

        Ok(FileMatchResult::Continue)
    }
}

impl Task for SyncWixVersionTask {
    fn names(&self) -> &'static [&'static str] {
        NAMES
    }

    fn description(&self) -> &'static str {
        "Synchronizes the product version in a Wix project to the version of a binary file"
    }

    fn usage(&self) -> String {
        render_usage::<SyncWixVersionArgs>(self.primary_name())
    }

    fn validate(&self, args: &[String]) -> Result<(), ConfigError> {
        validate_search(self, self.primary_name(), args).map(|_| ())
    }

    fn execute(&self, args: &[String], ctx: &mut TaskContext<'_>) -> Result<bool, TaskError> {
        execute_search(self, self.primary_name(), args, ctx)
    }
}
