use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{HostApi, HostError, NewIssue};

const API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("plugtrack/", env!("CARGO_PKG_VERSION"));

/// GitHub REST API client authenticated with a personal access token.
pub struct GithubClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl GithubClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            base_url: API_BASE.to_string(),
        }
    }

    /// Points the client at a different API root, for tests against a
    /// local stub server.
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            base_url: base_url.into(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, method = %method, "GitHub API request");
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, HostError> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, HostError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(HostError::NotFound);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(HostError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[derive(Deserialize)]
struct RepoInfo {
    default_branch: String,
}

#[derive(Deserialize)]
struct CommitInfo {
    sha: String,
}

#[derive(Deserialize)]
struct ReleaseInfo {
    tag_name: String,
}

#[derive(Deserialize)]
struct TagInfo {
    name: String,
}

#[derive(Deserialize)]
struct IssueInfo {
    title: String,
}

#[derive(Deserialize)]
struct CreatedIssue {
    number: u64,
}

#[async_trait]
impl HostApi for GithubClient {
    async fn default_branch(&self, owner: &str, repo: &str) -> Result<String, HostError> {
        let info: RepoInfo = self.get_json(&format!("/repos/{owner}/{repo}")).await?;
        Ok(info.default_branch)
    }

    async fn latest_commit(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<String, HostError> {
        let commits: Vec<CommitInfo> = self
            .get_json(&format!(
                "/repos/{owner}/{repo}/commits?sha={branch}&per_page=1"
            ))
            .await?;
        commits
            .into_iter()
            .next()
            .map(|c| c.sha)
            .ok_or(HostError::NotFound)
    }

    async fn latest_release(&self, owner: &str, repo: &str) -> Result<String, HostError> {
        let release: ReleaseInfo = self
            .get_json(&format!("/repos/{owner}/{repo}/releases/latest"))
            .await?;
        Ok(release.tag_name)
    }

    async fn list_tags(&self, owner: &str, repo: &str) -> Result<Vec<String>, HostError> {
        let tags: Vec<TagInfo> = self
            .get_json(&format!("/repos/{owner}/{repo}/tags?per_page=100"))
            .await?;
        Ok(tags.into_iter().map(|t| t.name).collect())
    }

    async fn open_issue_titles(&self, slug: &str, label: &str) -> Result<Vec<String>, HostError> {
        let issues: Vec<IssueInfo> = self
            .get_json(&format!(
                "/repos/{slug}/issues?state=open&labels={label}&per_page=100"
            ))
            .await?;
        Ok(issues.into_iter().map(|i| i.title).collect())
    }

    async fn create_issue(&self, slug: &str, issue: &NewIssue) -> Result<u64, HostError> {
        let response = self
            .request(reqwest::Method::POST, &format!("/repos/{slug}/issues"))
            .json(issue)
            .send()
            .await?;
        let created: CreatedIssue = Self::decode(response).await?;
        Ok(created.number)
    }
}
