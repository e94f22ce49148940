//! Core domain models for buildtask
//!
//! This module contains the fundamental types used throughout the application:
//! - Version numbers with unspecified trailing components
//! - Component selection settings for increment and copy operations
//! - The per-file outcome that steers a wildcard search

mod apply_settings;
mod file_match;
mod version;

pub use apply_settings::VersionApplySettings;
pub use file_match::FileMatchResult;
pub use version::{format_version, Version};
