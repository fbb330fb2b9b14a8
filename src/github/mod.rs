// src/github/mod.rs
// =============================================================================
// This module handles everything that talks to GitHub.
//
// Submodules:
// - repo_url: parse "https://github.com/owner/repo/tree/branch/folder" URLs
// - client: HTTP requests with auth, user agent and rate-limit backoff
// - rate_limit: reading X-RateLimit-* headers and deciding how long to wait
// - fetch: listing folders and downloading the tree
// =============================================================================

mod client;
mod fetch;
mod rate_limit;
mod repo_url;

pub use client::ApiClient;
pub use fetch::{DownloadSummary, FolderDownloader};
pub use rate_limit::SystemClock;
pub use repo_url::resolve;

use crate::error::Result;
use crate::logger::Logger;
use std::path::PathBuf;
use std::sync::Arc;

/// Resolves `github_url` and wires up a downloader that talks to `api_url`
/// using the wall clock for rate-limit sleeps.
///
/// Fails with `MalformedUrl` before any network access.
pub fn downloader_for(
    github_url: &str,
    dest_folder: impl Into<PathBuf>,
    token: Option<String>,
    api_url: url::Url,
    logger: Arc<dyn Logger>,
) -> Result<FolderDownloader> {
    let coords = resolve(github_url).map_err(|e| {
        logger.error(&e.to_string());
        e
    })?;
    logger.info(&format!(
        "Extracted owner: {}, repo: {}, branch: {}, folder: {}",
        coords.owner, coords.repository, coords.branch, coords.folder_path
    ));

    let client = ApiClient::new(api_url, token, Arc::new(SystemClock), logger.clone())?;
    Ok(FolderDownloader::new(client, coords, dest_folder, logger))
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::repo_url::RepoCoordinates;
    use crate::error::FetchError;
    use crate::logger::{Level, RecordingLogger};

    #[test]
    fn test_downloader_for_rejects_bad_url_without_network() {
        let logger = Arc::new(RecordingLogger::default());
        let result = downloader_for(
            "https://github.com/owner/repo",
            "/tmp",
            None,
            url::Url::parse("http://127.0.0.1:9").unwrap(),
            logger.clone(),
        );

        assert!(matches!(result, Err(FetchError::MalformedUrl { .. })));
        assert_eq!(logger.at(Level::Error).len(), 1);
    }

    #[test]
    fn test_downloader_for_resolves_coordinates() {
        let logger = Arc::new(RecordingLogger::default());
        let downloader = downloader_for(
            "https://github.com/owner/repo/tree/dev/a/b",
            "/tmp",
            Some("t".to_string()),
            url::Url::parse("https://api.github.com").unwrap(),
            logger,
        )
        .unwrap();

        assert_eq!(
            downloader.coords(),
            &RepoCoordinates {
                owner: "owner".to_string(),
                repository: "repo".to_string(),
                branch: "dev".to_string(),
                folder_path: "a/b".to_string(),
            }
        );
    }
}
