use crate::github::{HostApi, HostError};
use crate::model::Plugin;

/// Conventional short form of a commit sha.
const SHORT_SHA_LEN: usize = 7;

/// Resolves the latest version identifier for a plugin.
///
/// Commit-tracked plugins resolve to the short sha of the newest commit
/// on the default branch. Release-tracked plugins resolve to the latest
/// release tag, falling back to the first listed tag when the repository
/// has no releases. A leading lowercase `v` is stripped from tag names.
pub async fn resolve_latest(api: &dyn HostApi, plugin: &Plugin) -> Result<String, HostError> {
    if plugin.tracks_commits {
        let branch = api.default_branch(&plugin.owner, &plugin.repo).await?;
        let sha = api
            .latest_commit(&plugin.owner, &plugin.repo, &branch)
            .await?;
        let short = sha.get(..SHORT_SHA_LEN).unwrap_or(&sha);
        return Ok(short.to_string());
    }

    match api.latest_release(&plugin.owner, &plugin.repo).await {
        Ok(tag) => Ok(strip_v_prefix(&tag).to_string()),
        Err(HostError::NotFound) => {
            let tags = api.list_tags(&plugin.owner, &plugin.repo).await?;
            match tags.first() {
                Some(tag) => Ok(strip_v_prefix(tag).to_string()),
                None => Err(HostError::NotFound),
            }
        }
        Err(e) => Err(e),
    }
}

fn strip_v_prefix(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}
