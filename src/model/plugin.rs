use serde::Serialize;

/// One row of the versions table: a plugin tracked against a GitHub
/// repository, with the version strings recorded per column.
#[derive(Debug, Clone, Serialize)]
pub struct Plugin {
    pub name: String,
    /// Normalized repository URL (trailing slash stripped).
    pub source_url: String,
    pub owner: String,
    pub repo: String,
    /// Recorded version per table column. Entries may be empty when a
    /// column does not apply to this plugin.
    pub versions: Vec<String>,
    /// True when the plugin is tracked by commit hash rather than
    /// release tag (first non-empty version cell is 7+ hex chars).
    pub tracks_commits: bool,
}

impl Plugin {
    /// "owner/repo" identifier used in API paths and log lines.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}
