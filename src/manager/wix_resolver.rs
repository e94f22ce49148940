//! Locates the product version of a Wix project
//!
//! The version lives in the `Version` attribute of `Wix/Product`, either in
//! the project file itself or in one of the files it includes through
//! `Compile` or `Content` items. When the attribute refers to a build
//! variable such as `$(var.ProductVersion)`, the included files are searched
//! again for the `<?define ?>` instruction that declares the variable.
//!
//! Only one level of indirection is followed. A variable defined in terms of
//! another variable is not resolved further.

use super::text_file::{self, TextFile};
use crate::error::ManagerError;
use regex::Regex;
use roxmltree::{Document, Node, NodeType};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};

pub const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";
pub const WIX_NAMESPACE: &str = "http://schemas.microsoft.com/wix/2006/wi";

/// Build variable reference, e.g. `$(var.ProductVersion)`
static VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\(var\.(?P<name>[^)]+)\)").unwrap());

/// Version number embedded in free-form `define` content
static DEFINE_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+){0,3}").unwrap());

/// Where a resolved version text was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationKind {
    /// The `Version` attribute of a `Product` element
    ProductAttribute,
    /// A `define` processing instruction; `definition` is its full content
    Definition { definition: String },
}

/// A resolved product version and the file that holds it
#[derive(Debug, Clone)]
pub struct VersionLocation {
    /// File that declares the version
    pub path: PathBuf,
    /// Decoded content of that file
    pub file: TextFile,
    /// Byte range of the version text within `file.content`.
    ///
    /// For a definition without a version number this is empty.
    pub range: Range<usize>,
    pub kind: LocationKind,
}

impl VersionLocation {
    /// Returns the version text at the location
    pub fn text(&self) -> &str {
        &self.file.content[self.range.clone()]
    }

    /// Returns true if a version number was found at the location
    pub fn has_version(&self) -> bool {
        !self.range.is_empty()
    }

    /// Replaces the version text and saves the file in its original encoding
    pub fn write(&self, new_text: &str) -> Result<(), ManagerError> {
        if !self.has_version() {
            if let LocationKind::Definition { definition } = &self.kind {
                return Err(ManagerError::NoVersionNumber {
                    path: self.path.clone(),
                    content: definition.clone(),
                });
            }
        }

        let content = &self.file.content;
        let mut updated = String::with_capacity(content.len() + new_text.len());
        updated.push_str(&content[..self.range.start]);
        updated.push_str(new_text);
        updated.push_str(&content[self.range.end..]);

        text_file::write_text(&self.path, &updated, self.file.encoding)
    }
}

/// Resolves where the product version of `project_path` is declared.
///
/// Returns `Ok(None)` when the project is not well-formed XML or no version
/// declaration can be found. Included files that are missing or malformed
/// are skipped.
pub fn resolve(project_path: &Path) -> Result<Option<VersionLocation>, ManagerError> {
    let Some(project) = load(project_path)? else {
        debug!("Project '{}' is not a valid XML document", project_path.display());
        return Ok(None);
    };

    let includes = {
        let doc = match Document::parse(&project.content) {
            Ok(doc) => doc,
            Err(_) => return Ok(None),
        };

        if let Some(range) = find_product_version(&doc) {
            let location = VersionLocation {
                path: project_path.to_path_buf(),
                file: project.clone(),
                range,
                kind: LocationKind::ProductAttribute,
            };
            return follow_variable(project_path, location, &include_paths(project_path, &doc));
        }

        include_paths(project_path, &doc)
    };

    if includes.is_empty() {
        debug!("No include files found in '{}'", project_path.display());
        return Ok(None);
    }

    for include in &includes {
        let Some(file) = load_include(include)? else {
            continue;
        };

        let range = match Document::parse(&file.content) {
            Ok(doc) => find_product_version(&doc),
            Err(_) => None,
        };

        if let Some(range) = range {
            let location = VersionLocation {
                path: include.clone(),
                file,
                range,
                kind: LocationKind::ProductAttribute,
            };
            return follow_variable(project_path, location, &includes);
        }
    }

    debug!(
        "No product version found in '{}' or its include files",
        project_path.display()
    );
    Ok(None)
}

/// Returns the absolute paths of every `Compile` and `Content` include of a project
pub fn include_paths(project_path: &Path, doc: &Document) -> Vec<PathBuf> {
    let project_directory = project_path.parent().unwrap_or(Path::new(""));

    doc.root_element()
        .children()
        .filter(|n| n.has_tag_name((MSBUILD_NAMESPACE, "ItemGroup")))
        .flat_map(|group| group.children())
        .filter(|n| {
            n.has_tag_name((MSBUILD_NAMESPACE, "Compile"))
                || n.has_tag_name((MSBUILD_NAMESPACE, "Content"))
        })
        .filter_map(|n| n.attribute("Include"))
        .map(|include| project_directory.join(normalize_separators(include)))
        .collect()
}

/// Returns the variable name if `text` is a build variable reference
pub fn variable_name(text: &str) -> Option<&str> {
    VARIABLE_RE
        .captures(text)
        .and_then(|caps| caps.name("name"))
        .map(|m| m.as_str())
}

/// If the located attribute references a variable, resolves its definition instead
fn follow_variable(
    project_path: &Path,
    location: VersionLocation,
    includes: &[PathBuf],
) -> Result<Option<VersionLocation>, ManagerError> {
    let Some(name) = variable_name(location.text()).map(str::to_string) else {
        return Ok(Some(location));
    };

    debug!(
        "Product version in '{}' refers to variable '{}'",
        location.path.display(),
        name
    );

    for include in includes {
        let Some(file) = load_include(include)? else {
            continue;
        };

        if let Some(found) = find_definition(include, file, &name) {
            return Ok(Some(found));
        }
    }

    debug!(
        "No definition of variable '{}' found in the include files of '{}'",
        name,
        project_path.display()
    );
    Ok(None)
}

/// Finds the range of `Wix/Product/@Version` in a document
fn find_product_version(doc: &Document) -> Option<Range<usize>> {
    let root = doc.root_element();
    if !root.has_tag_name((WIX_NAMESPACE, "Wix")) {
        return None;
    }

    root.children()
        .filter(|n| n.has_tag_name((WIX_NAMESPACE, "Product")))
        .find_map(|product| product.attributes().find(|a| a.name() == "Version"))
        .map(|attribute| attribute.range_value())
}

/// Finds the first `define` instruction whose content mentions `name`
fn find_definition(path: &Path, file: TextFile, name: &str) -> Option<VersionLocation> {
    let (definition, range) = {
        let doc = Document::parse(&file.content).ok()?;
        let node = doc.descendants().find(|n| is_definition_of(n, name))?;
        let definition = node.pi()?.value.unwrap_or_default().to_string();
        let range = definition_version_range(&file.content, node.range(), name);
        (definition, range)
    };

    Some(VersionLocation {
        path: path.to_path_buf(),
        file,
        range,
        kind: LocationKind::Definition { definition },
    })
}

fn is_definition_of(node: &Node, name: &str) -> bool {
    node.node_type() == NodeType::PI
        && node.pi().is_some_and(|pi| {
            pi.target == "define" && pi.value.is_some_and(|value| value.contains(name))
        })
}

/// Locates the version number after the variable name inside a raw instruction.
///
/// Returns an empty range at the end of the instruction when there is none.
fn definition_version_range(content: &str, node: Range<usize>, name: &str) -> Range<usize> {
    let raw = &content[node.clone()];
    let search_from = raw.find(name).map(|i| i + name.len()).unwrap_or(0);

    match DEFINE_VERSION_RE.find(&raw[search_from..]) {
        Some(m) => {
            let start = node.start + search_from + m.start();
            start..start + m.len()
        }
        None => node.end..node.end,
    }
}

/// Reads a file, treating undecodable content as not found
fn load(path: &Path) -> Result<Option<TextFile>, ManagerError> {
    match text_file::read_text(path) {
        Ok(file) => Ok(Some(file)),
        Err(ManagerError::InvalidEncoding { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

fn load_include(path: &Path) -> Result<Option<TextFile>, ManagerError> {
    if !path.is_file() {
        warn!("Include file '{}' does not exist", path.display());
        return Ok(None);
    }

    let file = load(path)?;
    if file.is_none() {
        debug!("Include file '{}' is not a text file", path.display());
    }
    Ok(file)
}

/// Converts a project-relative path written with either separator to a host path
pub(crate) fn normalize_separators(include: &str) -> PathBuf {
    if Path::new(include).is_absolute() {
        return PathBuf::from(include);
    }

    include
        .split(['\\', '/'])
        .filter(|part| !part.is_empty())
        .collect()
}
