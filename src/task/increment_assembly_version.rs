//! IncrementAssemblyVersion task

use super::{
    execute_search, render_usage, validate_search, ComponentArgs, FileSearchTask, Task,
    TaskContext,
};
use crate::domain::{FileMatchResult, VersionApplySettings};
use crate::error::{ConfigError, TaskError};
use crate::manager::{get_manager, VersionManagerKind};
use clap::Parser;
use std::path::Path;
use tracing::debug;

const NAMES: &[&str] = &["IncrementAssemblyVersion", "iav"];

/// Arguments of the IncrementAssemblyVersion task
#[derive(Parser, Debug, Clone)]
#[command(about = "Increments version number parts in AssemblyVersion attributes of code files")]
pub struct IncrementAssemblyVersionArgs {
    /// Absolute file search pattern of the code files to update; may contain * wildcards
    #[arg(long)]
    pub pattern: String,

    #[command(flatten)]
    pub components: ComponentArgs,
}

/// Increments selected components of `AssemblyVersion` attributes
pub struct IncrementAssemblyVersionTask;

impl FileSearchTask for IncrementAssemblyVersionTask {
    type Args = IncrementAssemblyVersionArgs;
    type Settings = VersionApplySettings;

    fn pattern(args: &Self::Args) -> &str {
        &args.pattern
    }

    fn check(&self, args: &Self::Args) -> Result<(), String> {
        args.components.check()
    }

    fn before_search(&self, args: Self::Args) -> Result<Self::Settings, TaskError> {
        Ok(args.components.settings())
    }

    fn file_match(
        &self,
        path: &Path,
        settings: &Self::Settings,
        ctx: &mut TaskContext<'_>,
    ) -> Result<FileMatchResult, TaskError> {
        let manager = get_manager(VersionManagerKind::AssemblyInfo);

        let Some(current) = manager.read_version(path)? else {
            debug!("No assembly version found in '{}'", path.display());
            return Ok(FileMatchResult::Continue);
        };

        let incremented = current.increment(settings);
        ctx.notifier.version_updated(path, &current, &incremented)?;
        manager.write_version(path, &incremented)?;

        Ok(FileMatchResult::Continue)
    }
}

impl Task for IncrementAssemblyVersionTask {
    fn names(&self) -> &'static [&'static str] {
        NAMES
    }

    fn description(&self) -> &'static str {
        "Increments version number parts in AssemblyVersion attributes of code files"
    }

    fn usage(&self) -> String {
        render_usage::<IncrementAssemblyVersionArgs>(self.primary_name())
    }

    fn validate(&self, args: &[String]) -> Result<(), ConfigError> {
        validate_search(self, self.primary_name(), args).map(|_| ())
    }

    fn execute(&self, args: &[String], ctx: &mut TaskContext<'_>) -> Result<bool, TaskError> {
        execute_search(self, self.primary_name(), args, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::TextNotifier;
    use crate::task::TaskRegistry;
    use std::fs;
    use tempfile::TempDir;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn pattern(dir: &TempDir) -> String {
        format!("{}/*/AssemblyInfo.cs", dir.path().display())
    }

    #[test]
    fn test_validate_requires_component() {
        let dir = TempDir::new().unwrap();
        let err = IncrementAssemblyVersionTask
            .validate(&args(&["--pattern", &pattern(&dir)]))
            .unwrap_err();
        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn test_validate_requires_pattern() {
        let err = IncrementAssemblyVersionTask
            .validate(&args(&["--build"]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArguments { .. }));
    }

    #[test]
    fn test_validate_accepts_short_flags() {
        let dir = TempDir::new().unwrap();
        IncrementAssemblyVersionTask
            .validate(&args(&["--pattern", &pattern(&dir), "-M", "-m", "-b", "-r"]))
            .unwrap();
    }

    #[test]
    fn test_execute_increments_matching_files() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("One/Properties/AssemblyInfo.cs");
        let second = dir.path().join("Two/Properties/AssemblyInfo.cs");
        let unrelated = dir.path().join("Two/Program.cs");
        for path in [&first, &second, &unrelated] {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
        }
        fs::write(&first, "[assembly: AssemblyVersion(\"2.56.14.46876\")]\n").unwrap();
        fs::write(&second, "[assembly: AssemblyVersion(\"1.0.*\")]\n").unwrap();
        fs::write(&unrelated, "[assembly: AssemblyVersion(\"9.9.9.9\")]\n").unwrap();

        let registry = TaskRegistry::new();
        let mut notifier = TextNotifier::with_color(Vec::new(), false);
        let mut ctx = TaskContext::new(&registry, &mut notifier);

        let result = IncrementAssemblyVersionTask
            .execute(&args(&["--pattern", &pattern(&dir), "--build"]), &mut ctx)
            .unwrap();

        assert!(result);
        assert!(fs::read_to_string(&first).unwrap().contains("\"2.56.15.46876\""));
        assert!(fs::read_to_string(&second).unwrap().contains("\"1.0.*\""));
        assert!(fs::read_to_string(&unrelated).unwrap().contains("\"9.9.9.9\""));

        let output = String::from_utf8(notifier.into_inner()).unwrap();
        assert!(output.contains("2.56.14.46876 -> 2.56.15.46876"));
    }

    #[test]
    fn test_execute_skips_files_without_attribute() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("App/AssemblyInfo.cs");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "// no attribute\n").unwrap();

        let registry = TaskRegistry::new();
        let mut notifier = TextNotifier::with_color(Vec::new(), false);
        let mut ctx = TaskContext::new(&registry, &mut notifier);

        let result = IncrementAssemblyVersionTask
            .execute(&args(&["--pattern", &pattern(&dir), "--major"]), &mut ctx)
            .unwrap();

        assert!(result);
        assert_eq!(fs::read_to_string(&path).unwrap(), "// no attribute\n");
    }
}
