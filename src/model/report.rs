use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of the issue reconciliation step for one outdated plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IssueOutcome {
    Created { number: u64 },
    AlreadyExists,
    DryRun,
    Failed,
}

/// Per-plugin result of a check run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PluginStatus {
    UpToDate,
    UpdateAvailable { latest: String, issue: IssueOutcome },
    Error { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct PluginReport {
    pub name: String,
    pub repo: String,
    #[serde(flatten)]
    pub status: PluginStatus,
}

/// Aggregate result of a full check run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub checked_at: DateTime<Utc>,
    pub plugins_checked: usize,
    pub updates_found: usize,
    pub errors: usize,
    pub plugins: Vec<PluginReport>,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}
