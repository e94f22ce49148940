//! MSBuild project file queries
//!
//! Reads the properties needed to find a project's build output:
//! - the output file name (`OutputType` + `AssemblyName`, or `OutputName` for Wix)
//! - the output directory of each build configuration

use crate::error::{ProjectError, TaskError};
use crate::manager::text_file;
use crate::manager::wix_resolver::{normalize_separators, MSBUILD_NAMESPACE};
use regex::Regex;
use roxmltree::{Document, Node};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, error};

const CONFIGURATION_VARIABLE: &str = "$(Configuration)";

/// Condition of a configuration property group, e.g. `'$(Configuration)|$(Platform)' == 'Debug|x86'`
static CONFIGURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"'\$\(Configuration\)\|\$\(Platform\)'\s*==\s*'(?P<configuration>[^|']+)\|[^']+'")
        .unwrap()
});

/// A loaded MSBuild project file
#[derive(Debug, Clone)]
pub struct ProjectFile {
    path: PathBuf,
    content: String,
}

impl ProjectFile {
    /// Reads a project file from disk
    pub fn load(path: &Path) -> Result<Self, TaskError> {
        let file = text_file::read_text(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            content: file.content,
        })
    }

    /// Creates a project from in-memory content
    pub fn from_content(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the directory holding the project file
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new(""))
    }

    /// Parses the project XML
    pub fn parse(&self) -> Result<Document<'_>, ProjectError> {
        Document::parse(&self.content).map_err(|e| ProjectError::ParseError {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Resolves every configured output directory against the project directory
    pub fn output_directories(&self, doc: &Document) -> Result<Vec<PathBuf>, ProjectError> {
        let directories = target_directories(doc)
            .ok_or_else(|| ProjectError::NoBuildConfigurations {
                path: self.path.clone(),
            })?
            .into_iter()
            .map(|target| self.directory().join(normalize_separators(&target)))
            .collect();

        Ok(directories)
    }
}

/// Returns the text of the first `Project/PropertyGroup/<name>` element
pub fn property<'a>(doc: &'a Document, name: &str) -> Option<&'a str> {
    property_groups(doc)
        .flat_map(|group| group.children())
        .find(|n| n.has_tag_name((MSBUILD_NAMESPACE, name)))
        .map(|n| n.text().unwrap_or_default().trim())
}

/// Output file name of a C# or VB project: `<AssemblyName>.exe` or `<AssemblyName>.dll`
pub fn binary_output_name(doc: &Document) -> Option<String> {
    let Some(output_type) = property(doc, "OutputType") else {
        debug!("Project has no OutputType property");
        return None;
    };

    let assembly_name = match property(doc, "AssemblyName") {
        Some(name) if !name.is_empty() => name,
        Some(_) => {
            debug!("Project has an empty AssemblyName property");
            return None;
        }
        None => {
            debug!("Project has no AssemblyName property");
            return None;
        }
    };

    match output_type {
        "Exe" | "WinExe" => Some(format!("{}.exe", assembly_name)),
        "Library" => Some(format!("{}.dll", assembly_name)),
        other => {
            error!("Output type '{}' is not supported", other);
            None
        }
    }
}

/// Output file name of a Wix project: `<OutputName>.msi`
pub fn wix_output_name(doc: &Document) -> Option<String> {
    match property(doc, "OutputName") {
        Some(name) if !name.is_empty() => Some(format!("{}.msi", name)),
        Some(_) => {
            debug!("Project has an empty OutputName property");
            None
        }
        None => {
            debug!("Project has no OutputName property");
            None
        }
    }
}

/// Returns the output path of every conditional property group.
///
/// Returns `None` when the project has no conditional property groups.
pub fn target_directories(doc: &Document) -> Option<Vec<String>> {
    let configurations: Vec<Node> = property_groups(doc)
        .filter(|group| group.attribute("Condition").is_some_and(|c| !c.trim().is_empty()))
        .collect();

    if configurations.is_empty() {
        return None;
    }

    Some(configurations.iter().filter_map(target_directory).collect())
}

/// Extracts the configuration name from a property group condition
pub fn configuration_name(condition: &str) -> Option<&str> {
    CONFIGURATION_RE
        .captures(condition)
        .and_then(|caps| caps.name("configuration"))
        .map(|m| m.as_str())
}

fn target_directory(configuration: &Node) -> Option<String> {
    let output_path = configuration
        .children()
        .find(|n| n.has_tag_name((MSBUILD_NAMESPACE, "OutputPath")))
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|p| !p.is_empty())?;

    if !output_path.contains(CONFIGURATION_VARIABLE) {
        return Some(output_path.to_string());
    }

    let condition = configuration.attribute("Condition").unwrap_or_default();
    match configuration_name(condition) {
        Some(name) => Some(output_path.replace(CONFIGURATION_VARIABLE, name)),
        None => {
            debug!("Cannot resolve {} in output path '{}'", CONFIGURATION_VARIABLE, output_path);
            None
        }
    }
}

fn property_groups<'a, 'input>(
    doc: &'a Document<'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    doc.root_element()
        .children()
        .filter(|n| n.has_tag_name((MSBUILD_NAMESPACE, "PropertyGroup")))
}
