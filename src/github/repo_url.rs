// src/github/repo_url.rs
// =============================================================================
// Turns a GitHub "tree" browse URL into the coordinates the API needs.
//
// Accepted shape:
//   https://github.com/<owner>/<repo>/tree/<branch>/<folder/path/...>
//
// Example:
//   "https://github.com/rust-lang/rust/tree/master/src/tools"
//     -> owner "rust-lang", repo "rust", branch "master", folder "src/tools"
//
// Anything else (wrong host, no /tree/, no branch, no folder) is rejected
// with FetchError::MalformedUrl before any network access happens.
// =============================================================================

use crate::error::{FetchError, Result};
use percent_encoding::percent_decode_str;
use url::Url;

const GITHUB_HOSTS: [&str; 2] = ["github.com", "www.github.com"];

/// Where the folder to download lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoordinates {
    pub owner: String,
    pub repository: String,
    pub branch: String,
    /// Slash-separated, relative to the repository root
    pub folder_path: String,
}

impl RepoCoordinates {
    /// Same coordinates pinned to another branch.
    ///
    /// Used by the interactive flow when the requested branch does not exist.
    pub fn with_branch(self, branch: impl Into<String>) -> Self {
        RepoCoordinates {
            branch: branch.into(),
            ..self
        }
    }
}

/// Parses a browse URL into its four parts
pub fn resolve(input: &str) -> Result<RepoCoordinates> {
    let malformed = || FetchError::MalformedUrl {
        url: input.to_string(),
    };

    let url = Url::parse(input.trim()).map_err(|_| malformed())?;

    if url.scheme() != "https" {
        return Err(malformed());
    }
    match url.host_str() {
        Some(host) if GITHUB_HOSTS.contains(&host) => {}
        _ => return Err(malformed()),
    }

    // path() is "/owner/repo/tree/branch/rest..." (query and fragment excluded),
    // percent-encoded; decode so "my%20folder" comes back as "my folder"
    let path = percent_decode_str(url.path())
        .decode_utf8()
        .map_err(|_| malformed())?;
    let mut parts = path.trim_start_matches('/').splitn(5, '/');
    let owner = parts.next().unwrap_or_default();
    let repository = parts.next().unwrap_or_default();
    let tree = parts.next().unwrap_or_default();
    let branch = parts.next().unwrap_or_default();
    let folder_path = parts.next().unwrap_or_default().trim_end_matches('/');

    if owner.is_empty()
        || repository.is_empty()
        || tree != "tree"
        || branch.is_empty()
        || folder_path.is_empty()
    {
        return Err(malformed());
    }

    Ok(RepoCoordinates {
        owner: owner.to_string(),
        repository: repository.to_string(),
        branch: branch.to_string(),
        folder_path: folder_path.to_string(),
    })
}

/// Last `/`-separated segment of a folder path ("src/tools" -> "tools")
pub fn last_segment(folder_path: &str) -> &str {
    let trimmed = folder_path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
