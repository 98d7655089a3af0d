//! Core data types for plugin records and check results.
//!
//! - [`Plugin`] - A plugin parsed from the versions table
//! - [`CheckReport`] - Complete results of a check run
//! - [`PluginStatus`] / [`IssueOutcome`] - Per-plugin outcomes

mod plugin;
mod report;

pub use plugin::*;
pub use report::*;
