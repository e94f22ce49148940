//! buildtask - Build pipeline task runner library
//!
//! This library provides the core functionality for build pipeline tasks:
//! - Wildcard file search across nested directories
//! - Version numbers with unspecified trailing components
//! - Version managers for C# source files, Wix projects and compiled binaries
//! - Tasks that increment, synchronize and stamp versions on build output

pub mod cli;
pub mod domain;
pub mod error;
pub mod executor;
pub mod logging;
pub mod manager;
pub mod msbuild;
pub mod output;
pub mod search;
pub mod task;
