//! GitHub hosting-service accessor.
//!
//! The core logic only talks to GitHub through the [`HostApi`] trait,
//! which keeps the resolver and reconciler testable with an in-memory
//! implementation. [`GithubClient`] is the production REST implementation.

mod rest;

pub use rest::GithubClient;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by hosting-service operations.
#[derive(Debug, Error)]
pub enum HostError {
    /// The requested resource does not exist. Distinct from other API
    /// failures because the resolver falls back to tags when a repository
    /// reports no releases.
    #[error("not found")]
    NotFound,

    #[error("GitHub API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Payload for a new tracking issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

/// Read and write operations the checker needs from the hosting service.
#[async_trait]
pub trait HostApi: Send + Sync {
    /// Name of the repository's default branch.
    async fn default_branch(&self, owner: &str, repo: &str) -> Result<String, HostError>;

    /// Full sha of the newest commit on `branch`.
    async fn latest_commit(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<String, HostError>;

    /// Tag name of the latest published release. Returns
    /// [`HostError::NotFound`] when the repository has no releases.
    async fn latest_release(&self, owner: &str, repo: &str) -> Result<String, HostError>;

    /// Tag names in service order (newest first).
    async fn list_tags(&self, owner: &str, repo: &str) -> Result<Vec<String>, HostError>;

    /// Titles of open issues in `slug` ("owner/repo") carrying `label`.
    async fn open_issue_titles(&self, slug: &str, label: &str) -> Result<Vec<String>, HostError>;

    /// Creates an issue in `slug` and returns its number.
    async fn create_issue(&self, slug: &str, issue: &NewIssue) -> Result<u64, HostError>;
}
