//! Application error types using thiserror
//!
//! Error hierarchy:
//! - VersionError: Version text that cannot be parsed
//! - PatternError: Wildcard search patterns that cannot be resolved
//! - ManagerError: Version backends failing to read or write a file
//! - ProjectError: MSBuild project files that cannot be interpreted
//! - ConfigError: Rejected task arguments and registry problems

use std::path::PathBuf;
use thiserror::Error;

/// Error raised by a task; caught and logged by the executor
#[derive(Error, Debug)]
pub enum TaskError {
    /// Version text related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Search pattern related errors
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Version backend related errors
    #[error(transparent)]
    Manager(#[from] ManagerError),

    /// Project file related errors
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Argument and registry related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failed to write user-facing output
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// File system errors outside the version backends
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to version text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Text does not start with `major.minor`
    #[error("invalid version '{text}': expected major.minor[.build][.revision]")]
    InvalidFormat { text: String },

    /// A component does not fit in 32 bits
    #[error("version component '{component}' in '{text}' is out of range")]
    ComponentOutOfRange { text: String, component: String },
}

/// Errors related to wildcard search patterns
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Pattern is empty or whitespace
    #[error("search pattern is empty")]
    Empty,

    /// No directory separator precedes the first wildcard
    #[error("search pattern '{pattern}' has no base directory before its first wildcard")]
    NoBaseDirectory { pattern: String },

    /// Base directory is not an absolute path
    #[error("search pattern '{pattern}' does not start with an absolute directory")]
    NotAbsolute { pattern: String },

    /// Compiled expression was rejected by the regex engine
    #[error("search pattern '{pattern}' could not be compiled: {message}")]
    InvalidExpression { pattern: String, message: String },
}

/// Errors related to reading or writing versions in files
#[derive(Error, Debug)]
pub enum ManagerError {
    /// Failed to read a file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content cannot be decoded as text
    #[error("failed to decode text in {path}: {message}")]
    InvalidEncoding { path: PathBuf, message: String },

    /// Backend does not support the operation
    #[error("the {manager} version manager does not support {operation}")]
    UnsupportedOperation {
        manager: &'static str,
        operation: &'static str,
    },

    /// A define instruction holding a version has no version number in it
    #[error("the wix variable definition '{content}' in {path} does not contain a version number")]
    NoVersionNumber { path: PathBuf, content: String },
}

/// Errors related to MSBuild project files
#[derive(Error, Debug)]
pub enum ProjectError {
    /// Project is not well-formed XML
    #[error("failed to parse project {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// Project has no conditional property groups
    #[error("no build configurations found in project {path}")]
    NoBuildConfigurations { path: PathBuf },
}

/// Errors related to task arguments and task lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Argument set rejected by a task
    #[error("invalid arguments for task {task}: {message}")]
    InvalidArguments { task: String, message: String },

    /// Two tasks were registered under the same name
    #[error("task name '{name}' is already registered")]
    DuplicateTaskName { name: String },
}

impl TaskError {
    /// Creates a new Io error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TaskError::Io {
            path: path.into(),
            source,
        }
    }
}

impl VersionError {
    /// Creates a new InvalidFormat error
    pub fn invalid_format(text: impl Into<String>) -> Self {
        VersionError::InvalidFormat { text: text.into() }
    }

    /// Creates a new ComponentOutOfRange error
    pub fn component_out_of_range(text: impl Into<String>, component: impl Into<String>) -> Self {
        VersionError::ComponentOutOfRange {
            text: text.into(),
            component: component.into(),
        }
    }
}

impl ManagerError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManagerError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManagerError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new InvalidEncoding error
    pub fn invalid_encoding(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManagerError::InvalidEncoding {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new InvalidArguments error
    pub fn invalid_arguments(task: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidArguments {
            task: task.into(),
            message: message.into(),
        }
    }
}
