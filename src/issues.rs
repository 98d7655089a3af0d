//! Tracking-issue reconciliation.
//!
//! For each outdated plugin the reconciler checks whether an open issue
//! titled `Update <name> to <version>` already exists in the target
//! repository, and files one if not. Search and creation failures are
//! soft: they are logged and only affect that plugin's outcome.

use tracing::warn;

use crate::github::{HostApi, HostError, NewIssue};
use crate::model::{IssueOutcome, Plugin};

pub const UPDATE_LABEL: &str = "version-update";
pub const AUTOMATED_LABEL: &str = "automated";

pub struct IssueReconciler<'a> {
    api: &'a dyn HostApi,
    target_repo: String,
    dry_run: bool,
}

impl<'a> IssueReconciler<'a> {
    pub fn new(api: &'a dyn HostApi, target_repo: impl Into<String>, dry_run: bool) -> Self {
        Self {
            api,
            target_repo: target_repo.into(),
            dry_run,
        }
    }

    pub fn issue_title(plugin: &Plugin, latest: &str) -> String {
        format!("Update {} to {}", plugin.name, latest)
    }

    /// Files a tracking issue for `plugin` unless one already exists.
    ///
    /// In dry-run mode the would-be title, labels, and body are printed
    /// instead of performing the remote write.
    pub async fn reconcile(&self, plugin: &Plugin, latest: &str) -> IssueOutcome {
        let title = Self::issue_title(plugin, latest);

        match self.existing_issue(&title).await {
            Ok(true) => return IssueOutcome::AlreadyExists,
            Ok(false) => {}
            Err(e) => {
                // A failed search counts as "no existing issue"; worst
                // case is a duplicate that the next run would not create.
                warn!(plugin = %plugin.name, error = %e, "issue search failed");
                eprintln!("Error checking for existing issues: {e}");
            }
        }

        let issue = build_issue(plugin, latest, title);

        if self.dry_run {
            println!("\n[DRY RUN] Would create issue:");
            println!("  Title: {}", issue.title);
            println!("  Labels: {}", issue.labels.join(", "));
            println!("  Body:\n{}", issue.body);
            return IssueOutcome::DryRun;
        }

        match self.api.create_issue(&self.target_repo, &issue).await {
            Ok(number) => {
                println!("Created issue #{number}: {}", issue.title);
                IssueOutcome::Created { number }
            }
            Err(e) => {
                warn!(plugin = %plugin.name, error = %e, "issue creation failed");
                eprintln!("Error creating issue for {}: {e}", plugin.name);
                IssueOutcome::Failed
            }
        }
    }

    async fn existing_issue(&self, title: &str) -> Result<bool, HostError> {
        let titles = self
            .api
            .open_issue_titles(&self.target_repo, UPDATE_LABEL)
            .await?;
        Ok(titles.iter().any(|t| t == title))
    }
}

fn build_issue(plugin: &Plugin, latest: &str, title: String) -> NewIssue {
    let version_type = if plugin.tracks_commits {
        "commit"
    } else {
        "version"
    };

    // Deduplicated, order-preserving list of recorded versions.
    let mut current: Vec<&str> = Vec::new();
    for v in &plugin.versions {
        if !v.is_empty() && !current.contains(&v.as_str()) {
            current.push(v);
        }
    }
    let current = current.join(", ");

    let release_link = if plugin.tracks_commits {
        format!("{}/commit/{}", plugin.source_url, latest)
    } else {
        format!("{}/releases/tag/v{}", plugin.source_url, latest)
    };

    let body = format!(
        "A new {version_type} of **{name}** is available.\n\n\
         **Current {version_type}(s)**: {current}\n\
         **Latest {version_type}**: {latest}\n\n\
         **Repository**: {url}\n\
         **Release link**: {release_link}\n\n\
         This issue was automatically created by plugtrack.\n",
        name = plugin.name,
        url = plugin.source_url,
    );

    NewIssue {
        title,
        body,
        labels: vec![UPDATE_LABEL.to_string(), AUTOMATED_LABEL.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plugin(versions: &[&str], tracks_commits: bool) -> Plugin {
        Plugin {
            name: "TopSky".to_string(),
            source_url: "https://github.com/topsky/plugin".to_string(),
            owner: "topsky".to_string(),
            repo: "plugin".to_string(),
            versions: versions.iter().map(|v| v.to_string()).collect(),
            tracks_commits,
        }
    }

    #[test]
    fn test_issue_title_format() {
        let p = plugin(&["1.0.0"], false);
        assert_eq!(
            IssueReconciler::issue_title(&p, "1.1.0"),
            "Update TopSky to 1.1.0"
        );
    }

    #[test]
    fn test_release_issue_body() {
        let p = plugin(&["1.0.0", "", "1.0.0", "0.9.0"], false);
        let issue = build_issue(&p, "1.1.0", "Update TopSky to 1.1.0".to_string());

        assert_eq!(issue.labels, vec!["version-update", "automated"]);
        assert!(issue.body.contains("A new version of **TopSky**"));
        assert!(issue.body.contains("**Current version(s)**: 1.0.0, 0.9.0"));
        assert!(issue.body.contains("**Latest version**: 1.1.0"));
        assert!(issue
            .body
            .contains("https://github.com/topsky/plugin/releases/tag/v1.1.0"));
    }

    #[test]
    fn test_commit_issue_body() {
        let p = plugin(&["ab12cd3"], true);
        let issue = build_issue(&p, "ff00aa1", "Update TopSky to ff00aa1".to_string());

        assert!(issue.body.contains("A new commit of **TopSky**"));
        assert!(issue
            .body
            .contains("https://github.com/topsky/plugin/commit/ff00aa1"));
    }
}
