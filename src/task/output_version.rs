//! BinaryOutputVersion and WixOutputVersion tasks
//!
//! Both tasks rename (or copy) the build output of matching projects so the
//! file names carry the product version. They differ in the output file name
//! they look for and in where the version is read from:
//! - BinaryOutputVersion: `<AssemblyName>.exe|.dll`, version read from the binary
//! - WixOutputVersion: `<OutputName>.msi`, version read from the Wix project

use super::{execute_search, render_usage, validate_search, FileSearchTask, Task, TaskContext};
use crate::domain::{format_version, FileMatchResult, Version};
use crate::error::{ConfigError, TaskError};
use crate::manager::{get_manager, VersionManagerKind};
use crate::msbuild::{self, ProjectFile};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Default output name format: original name, a space, the version
pub const DEFAULT_NAME_FORMAT: &str = "{0} {1}";

/// Arguments of the BinaryOutputVersion and WixOutputVersion tasks
#[derive(Parser, Debug, Clone)]
pub struct OutputVersionArgs {
    /// Absolute file search pattern of the project files to process; may contain * wildcards
    #[arg(long)]
    pub pattern: String,

    /// Format of the new file name; {0} is the original name, {1} the product version
    #[arg(short = 'f', long, default_value = DEFAULT_NAME_FORMAT)]
    pub format: String,

    /// Copy the output files to the new name instead of moving them
    #[arg(short = 'c', long)]
    pub copy: bool,
}

/// Where the version of a project's output comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputVersionSource {
    /// Product version of the compiled output file
    Binary,
    /// Product version declared by the Wix project
    Wix,
}

/// Settings captured before the search
#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub format: String,
    pub copy: bool,
}

/// Renames project output to include the product version
pub struct OutputVersionTask {
    source: OutputVersionSource,
}

impl OutputVersionTask {
    /// The BinaryOutputVersion task
    pub fn binary() -> Self {
        Self {
            source: OutputVersionSource::Binary,
        }
    }

    /// The WixOutputVersion task
    pub fn wix() -> Self {
        Self {
            source: OutputVersionSource::Wix,
        }
    }

    fn output_name(&self, doc: &roxmltree::Document) -> Option<String> {
        match self.source {
            OutputVersionSource::Binary => msbuild::binary_output_name(doc),
            OutputVersionSource::Wix => msbuild::wix_output_name(doc),
        }
    }

    fn read_version(&self, project: &Path, output: &Path) -> Result<Option<Version>, TaskError> {
        let version = match self.source {
            OutputVersionSource::Binary => {
                get_manager(VersionManagerKind::Binary).read_version(output)?
            }
            OutputVersionSource::Wix => get_manager(VersionManagerKind::Wix).read_version(project)?,
        };
        debug!(
            "Version of '{}' is '{}'",
            project.display(),
            format_version(version.as_ref(), false)
        );
        Ok(version)
    }

    /// Renames the output in one target directory; returns true if any file changed
    fn process_directory(
        &self,
        project: &Path,
        directory: &Path,
        output_name: &str,
        settings: &OutputSettings,
        ctx: &mut TaskContext<'_>,
    ) -> Result<bool, TaskError> {
        if !directory.is_dir() {
            debug!("Skipping '{}', the directory does not exist", directory.display());
            return Ok(false);
        }

        let output = directory.join(output_name);
        if !output.is_file() {
            debug!("Skipping '{}', the file does not exist", output.display());
            return Ok(false);
        }

        let Some(version) = self.read_version(project, &output)? else {
            error!("No version found for '{}'", project.display());
            return Ok(false);
        };
        let version_text = version.format(false);

        let stem = Path::new(output_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut changed = false;
        for file in output_files(directory, &stem)? {
            let target = directory.join(versioned_name(&file, &settings.format, &version_text));
            if target == file {
                debug!("Skipping '{}', the new name is the same", file.display());
                continue;
            }

            if settings.copy {
                fs::copy(&file, &target).map_err(|e| TaskError::io(&target, e))?;
            } else {
                if target.exists() {
                    fs::remove_file(&target).map_err(|e| TaskError::io(&target, e))?;
                }
                fs::rename(&file, &target).map_err(|e| TaskError::io(&file, e))?;
            }

            ctx.notifier.output_renamed(&file, &target, settings.copy)?;
            changed = true;
        }

        Ok(changed)
    }
}

impl FileSearchTask for OutputVersionTask {
    type Args = OutputVersionArgs;
    type Settings = OutputSettings;

    fn pattern(args: &Self::Args) -> &str {
        &args.pattern
    }

    fn check(&self, args: &Self::Args) -> Result<(), String> {
        if args.format.trim().is_empty() {
            return Err("the name format must not be empty".to_string());
        }
        Ok(())
    }

    fn before_search(&self, args: Self::Args) -> Result<Self::Settings, TaskError> {
        Ok(OutputSettings {
            format: args.format,
            copy: args.copy,
        })
    }

    fn file_match(
        &self,
        path: &Path,
        settings: &Self::Settings,
        ctx: &mut TaskContext<'_>,
    ) -> Result<FileMatchResult, TaskError> {
        debug!("Loading project '{}'", path.display());
        let project = ProjectFile::load(path)?;
        let doc = project.parse()?;

        let Some(output_name) = self.output_name(&doc) else {
            error!("No output name found in project '{}'", path.display());
            return Ok(FileMatchResult::FailTask);
        };

        let mut changed = false;
        for directory in project.output_directories(&doc)? {
            if self.process_directory(path, &directory, &output_name, settings, ctx)? {
                changed = true;
            }
        }

        if !changed {
            error!("No output found to rename for project '{}'", path.display());
            return Ok(FileMatchResult::FailTask);
        }

        Ok(FileMatchResult::Continue)
    }
}

impl Task for OutputVersionTask {
    fn names(&self) -> &'static [&'static str] {
        match self.source {
            OutputVersionSource::Binary => &["BinaryOutputVersion", "bov"],
            OutputVersionSource::Wix => &["WixOutputVersion", "wov"],
        }
    }

    fn description(&self) -> &'static str {
        match self.source {
            OutputVersionSource::Binary => {
                "Renames the project output to include the product version of the project output"
            }
            OutputVersionSource::Wix => {
                "Renames the Wix project output to include the Wix product version"
            }
        }
    }

    fn usage(&self) -> String {
        render_usage::<OutputVersionArgs>(self.primary_name())
    }

    fn validate(&self, args: &[String]) -> Result<(), ConfigError> {
        validate_search(self, self.primary_name(), args).map(|_| ())
    }

    fn execute(&self, args: &[String], ctx: &mut TaskContext<'_>) -> Result<bool, TaskError> {
        execute_search(self, self.primary_name(), args, ctx)
    }
}

/// Lists the files in `directory` named `<stem>.<anything>`, sorted by name
fn output_files(directory: &Path, stem: &str) -> Result<Vec<PathBuf>, TaskError> {
    let prefix = format!("{}.", stem);
    let entries = fs::read_dir(directory).map_err(|e| TaskError::io(directory, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| TaskError::io(directory, e))?;
        let path = entry.path();
        let matches = path
            .file_name()
            .map(|name| name.to_string_lossy().starts_with(&prefix))
            .unwrap_or(false);

        if matches && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Builds the new file name: `format` applied to the file stem and version, plus the extension
pub fn versioned_name(file: &Path, format: &str, version: &str) -> String {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = file
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    format!(
        "{}{}",
        format.replace("{0}", &stem).replace("{1}", version),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::wix_resolver::{MSBUILD_NAMESPACE, WIX_NAMESPACE};
    use crate::output::TextNotifier;
    use crate::task::TaskRegistry;
    use tempfile::TempDir;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn write_binary(path: &Path) {
        let mut bytes = vec![0u8; 16];
        bytes.extend_from_slice(&[0xBD, 0x04, 0xEF, 0xFE, 0x00, 0x00, 0x01, 0x00]);
        for value in [0u32, 0, 0x0001_0002, 0x0003_0004] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes.extend_from_slice(&[0u8; 28]);
        fs::write(path, bytes).unwrap();
    }

    fn write_csproj(dir: &Path) {
        let project = format!(
            r#"<Project xmlns="{}">
  <PropertyGroup>
    <OutputType>Exe</OutputType>
    <AssemblyName>App</AssemblyName>
  </PropertyGroup>
  <PropertyGroup Condition=" '$(Configuration)|$(Platform)' == 'Debug|AnyCPU' ">
    <OutputPath>bin\Debug\</OutputPath>
  </PropertyGroup>
  <PropertyGroup Condition=" '$(Configuration)|$(Platform)' == 'Release|AnyCPU' ">
    <OutputPath>bin\$(Configuration)\</OutputPath>
  </PropertyGroup>
</Project>"#,
            MSBUILD_NAMESPACE
        );
        fs::write(dir.join("App.csproj"), project).unwrap();
    }

    fn run(task: &OutputVersionTask, values: &[&str]) -> (bool, String) {
        let registry = TaskRegistry::new();
        let mut notifier = TextNotifier::with_color(Vec::new(), false);
        let mut ctx = TaskContext::new(&registry, &mut notifier);
        let result = task.execute(&args(values), &mut ctx).unwrap();
        (result, String::from_utf8(notifier.into_inner()).unwrap())
    }

    #[test]
    fn test_versioned_name() {
        assert_eq!(versioned_name(Path::new("/bin/App.exe"), "{0} {1}", "1.2.3.4"), "App 1.2.3.4.exe");
        assert_eq!(versioned_name(Path::new("/bin/App.exe.config"), "{0}-v{1}", "1.2"), "App.exe-v1.2.config");
        assert_eq!(versioned_name(Path::new("/bin/README"), "{0} {1}", "1.0"), "README 1.0");
    }

    #[test]
    fn test_task_names() {
        assert_eq!(OutputVersionTask::binary().primary_name(), "BinaryOutputVersion");
        assert_eq!(OutputVersionTask::wix().primary_name(), "WixOutputVersion");
        assert!(OutputVersionTask::wix().answers_to("WOV"));
    }

    #[test]
    fn test_binary_output_moves_matching_files() {
        let dir = TempDir::new().unwrap();
        write_csproj(dir.path());
        let debug = dir.path().join("bin/Debug");
        fs::create_dir_all(&debug).unwrap();
        write_binary(&debug.join("App.exe"));
        fs::write(debug.join("App.pdb"), "pdb").unwrap();
        fs::write(debug.join("Other.dll"), "other").unwrap();

        let pattern = format!("{}/*.csproj", dir.path().display());
        let (result, output) = run(&OutputVersionTask::binary(), &["--pattern", &pattern]);

        assert!(result);
        assert!(debug.join("App 1.2.3.4.exe").is_file());
        assert!(debug.join("App 1.2.3.4.pdb").is_file());
        assert!(!debug.join("App.exe").exists());
        assert!(debug.join("Other.dll").is_file());
        assert!(output.contains("Moved"));
    }

    #[test]
    fn test_binary_output_copy_with_format() {
        let dir = TempDir::new().unwrap();
        write_csproj(dir.path());
        let release = dir.path().join("bin/Release");
        fs::create_dir_all(&release).unwrap();
        write_binary(&release.join("App.exe"));

        let pattern = format!("{}/*.csproj", dir.path().display());
        let (result, _) = run(
            &OutputVersionTask::binary(),
            &["--pattern", &pattern, "-f", "{0}_{1}", "-c"],
        );

        assert!(result);
        assert!(release.join("App.exe").is_file());
        assert!(release.join("App_1.2.3.4.exe").is_file());
    }

    #[test]
    fn test_format_keeping_the_name_leaves_files_alone() {
        for mode in [&["-f", "{0}", "-c"][..], &["-f", "{0}"][..]] {
            let dir = TempDir::new().unwrap();
            write_csproj(dir.path());
            let debug = dir.path().join("bin/Debug");
            fs::create_dir_all(&debug).unwrap();
            write_binary(&debug.join("App.exe"));
            fs::write(debug.join("App.pdb"), "pdb").unwrap();
            let binary = fs::read(debug.join("App.exe")).unwrap();

            let pattern = format!("{}/*.csproj", dir.path().display());
            let mut values = vec!["--pattern", pattern.as_str()];
            values.extend_from_slice(mode);
            let (result, output) = run(&OutputVersionTask::binary(), &values);

            assert!(!result, "{:?}", mode);
            assert!(output.is_empty());
            assert_eq!(fs::read(debug.join("App.exe")).unwrap(), binary);
            assert_eq!(fs::read_to_string(debug.join("App.pdb")).unwrap(), "pdb");
        }
    }

    #[test]
    fn test_binary_output_without_build_output_fails() {
        let dir = TempDir::new().unwrap();
        write_csproj(dir.path());

        let pattern = format!("{}/*.csproj", dir.path().display());
        let (result, _) = run(&OutputVersionTask::binary(), &["--pattern", &pattern]);
        assert!(!result);
    }

    #[test]
    fn test_binary_output_without_configurations_errors() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("App.csproj"),
            format!(
                "<Project xmlns=\"{}\"><PropertyGroup><OutputType>Exe</OutputType><AssemblyName>App</AssemblyName></PropertyGroup></Project>",
                MSBUILD_NAMESPACE
            ),
        )
        .unwrap();

        let pattern = format!("{}/*.csproj", dir.path().display());
        let registry = TaskRegistry::new();
        let mut notifier = TextNotifier::with_color(Vec::new(), false);
        let mut ctx = TaskContext::new(&registry, &mut notifier);
        let err = OutputVersionTask::binary()
            .execute(&args(&["--pattern", &pattern]), &mut ctx)
            .unwrap_err();
        assert!(err.to_string().contains("no build configurations"));
    }

    #[test]
    fn test_wix_output_uses_project_version() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Product.wxs"),
            format!("<Wix xmlns=\"{}\"><Product Version=\"2.0.1\" /></Wix>", WIX_NAMESPACE),
        )
        .unwrap();
        fs::write(
            dir.path().join("Setup.wixproj"),
            format!(
                r#"<Project xmlns="{}">
  <PropertyGroup><OutputName>Setup</OutputName></PropertyGroup>
  <PropertyGroup Condition=" '$(Configuration)|$(Platform)' == 'Release|x86' ">
    <OutputPath>bin\$(Configuration)\</OutputPath>
  </PropertyGroup>
  <ItemGroup><Compile Include="Product.wxs" /></ItemGroup>
</Project>"#,
                MSBUILD_NAMESPACE
            ),
        )
        .unwrap();
        let release = dir.path().join("bin/Release");
        fs::create_dir_all(&release).unwrap();
        fs::write(release.join("Setup.msi"), "msi").unwrap();

        let pattern = format!("{}/*.wixproj", dir.path().display());
        let (result, _) = run(&OutputVersionTask::wix(), &["--pattern", &pattern]);

        assert!(result);
        assert!(release.join("Setup 2.0.1.msi").is_file());
    }

    #[test]
    fn test_validate_rejects_empty_format() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.csproj", dir.path().display());
        let err = OutputVersionTask::binary()
            .validate(&args(&["--pattern", &pattern, "--format", " "]))
            .unwrap_err();
        assert!(err.to_string().contains("name format"));
    }
}
