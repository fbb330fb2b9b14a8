// src/github/fetch.rs
// =============================================================================
// This module downloads a folder (and everything under it) from GitHub.
//
// Strategy:
// - List the folder with the contents API:
//     GET /repos/{owner}/{repo}/contents/{path}?ref={branch}
// - Download every file it contains through its download_url
// - Then descend into each subfolder, in the order GitHub listed them
//
// The walk is depth-first, pre-order: a folder's own files are written before
// any of its subfolders is visited. Instead of recursion we keep a stack of
// (remote path, local parent) pairs still to visit.
//
// Any failure stops the whole walk. Nothing is retried, and files already
// written stay on disk.
//
// Rust concepts:
// - async functions: every network call is awaited before the next starts
// - serde: the API's JSON maps straight onto the ContentItem struct
// - Path/PathBuf: building local destinations without string juggling
// =============================================================================

use crate::error::{FetchError, Result};
use crate::github::client::ApiClient;
use crate::github::repo_url::{last_segment, RepoCoordinates};
use crate::logger::Logger;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// One element of a contents-API listing, as GitHub sends it
#[derive(Debug, Deserialize)]
struct ContentItem {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    download_url: Option<String>,
}

// One element of the branches listing
#[derive(Debug, Deserialize)]
struct Branch {
    name: String,
}

/// A file listed in a remote folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub name: String,
    pub download_url: String,
}

/// One entry of a folder listing, after filtering out unsupported kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEntry {
    File(RemoteFile),
    Directory { name: String },
}

impl DirectoryEntry {
    pub fn name(&self) -> &str {
        match self {
            DirectoryEntry::File(file) => &file.name,
            DirectoryEntry::Directory { name } => name,
        }
    }
}

/// Entries of one folder split by kind, listing order preserved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderListing {
    pub folders: Vec<String>,
    pub files: Vec<RemoteFile>,
}

impl FromIterator<DirectoryEntry> for FolderListing {
    fn from_iter<I: IntoIterator<Item = DirectoryEntry>>(iter: I) -> Self {
        let mut listing = FolderListing::default();
        for entry in iter {
            match entry {
                DirectoryEntry::File(file) => listing.files.push(file),
                DirectoryEntry::Directory { name } => listing.folders.push(name),
            }
        }
        listing
    }
}

/// A file paired with the local folder it goes into
#[derive(Debug, Clone)]
pub struct DownloadTarget {
    pub file: RemoteFile,
    pub dest_dir: PathBuf,
}

impl DownloadTarget {
    pub fn path(&self) -> PathBuf {
        self.dest_dir.join(&self.file.name)
    }
}

/// What a finished run wrote to disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub folders: usize,
    pub files: usize,
    pub bytes: u64,
}

/// Downloads one folder of one repository into a local destination
pub struct FolderDownloader {
    client: ApiClient,
    coords: RepoCoordinates,
    dest_folder: PathBuf,
    logger: Arc<dyn Logger>,
}

impl FolderDownloader {
    pub fn new(
        client: ApiClient,
        coords: RepoCoordinates,
        dest_folder: impl Into<PathBuf>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let dest_folder = dest_folder.into();
        logger.info(&format!(
            "Initializing downloader for {}/{} (branch '{}', folder '{}'), destination: {}",
            coords.owner,
            coords.repository,
            coords.branch,
            coords.folder_path,
            dest_folder.display()
        ));

        FolderDownloader {
            client,
            coords,
            dest_folder,
            logger,
        }
    }

    pub fn coords(&self) -> &RepoCoordinates {
        &self.coords
    }

    /// Pins the downloader to a different branch (interactive fallback)
    pub fn set_branch(&mut self, branch: &str) {
        self.coords = self.coords.clone().with_branch(branch);
    }

    /// Branch names of the repository, in the order GitHub returns them
    pub async fn list_branches(&self) -> Result<Vec<String>> {
        self.logger.debug("Fetching repository branches...");
        let url = self.client.endpoint(
            ["repos", self.coords.owner.as_str(), self.coords.repository.as_str(), "branches"],
            &[],
        )?;

        let branches: Vec<Branch> = self.client.get_json(url.as_str()).await.map_err(|e| {
            self.logger
                .error(&format!("Failed to fetch branches: {}", e));
            e
        })?;

        let names: Vec<String> = branches.into_iter().map(|b| b.name).collect();
        self.logger
            .info(&format!("Branches fetched: {:?}", names));
        Ok(names)
    }

    /// Lists the immediate entries of `folder_path` at the pinned branch
    pub async fn list_folder(&self, folder_path: &str) -> Result<FolderListing> {
        self.logger
            .debug(&format!("Listing files in folder: {}", folder_path));
        let prefix = ["repos", self.coords.owner.as_str(), self.coords.repository.as_str(), "contents"];
        let url = self.client.endpoint(
            prefix.into_iter().chain(folder_path.split('/')),
            &[("ref", self.coords.branch.as_str())],
        )?;

        let items: Vec<ContentItem> = self.client.get_json(url.as_str()).await.map_err(|e| {
            self.logger.error(&format!(
                "Failed to list contents for folder: {}: {}",
                folder_path, e
            ));
            e
        })?;

        let entries: Vec<DirectoryEntry> = items
            .into_iter()
            .filter_map(|item| self.classify(folder_path, item))
            .collect();
        for entry in &entries {
            self.logger
                .debug(&format!("  {}/{}", folder_path, entry.name()));
        }

        let listing: FolderListing = entries.into_iter().collect();

        let file_names: Vec<&str> = listing.files.iter().map(|f| f.name.as_str()).collect();
        self.logger.info(&format!(
            "Files: {:?}, Folders: {:?}",
            file_names, listing.folders
        ));
        Ok(listing)
    }

    // Maps a raw listing item to an entry, or None (with a warning) for
    // kinds we cannot mirror: symlinks, submodules, files without content URL.
    fn classify(&self, folder_path: &str, item: ContentItem) -> Option<DirectoryEntry> {
        match (item.kind.as_str(), item.download_url) {
            ("dir", _) => Some(DirectoryEntry::Directory { name: item.name }),
            ("file", Some(download_url)) => Some(DirectoryEntry::File(RemoteFile {
                name: item.name,
                download_url,
            })),
            (kind, _) => {
                self.logger.warning(&format!(
                    "Skipping '{}/{}': unsupported entry type '{}'",
                    folder_path, item.name, kind
                ));
                None
            }
        }
    }

    /// Fetches `file_url` and writes it to `dest_dir/filename`, overwriting
    /// an existing file and creating `dest_dir` when needed.
    ///
    /// Returns the number of bytes written.
    pub async fn download_file(&self, file_url: &str, dest_dir: &Path, filename: &str) -> Result<u64> {
        let target = DownloadTarget {
            file: RemoteFile {
                name: filename.to_string(),
                download_url: file_url.to_string(),
            },
            dest_dir: dest_dir.to_path_buf(),
        };
        self.logger.debug(&format!(
            "Downloading file: {} from {}",
            target.file.name, target.file.download_url
        ));

        let content = self.client.get_bytes(&target.file.download_url).await?;

        tokio::fs::create_dir_all(&target.dest_dir)
            .await
            .map_err(|e| FetchError::io(&target.dest_dir, e))?;

        let dest_path = target.path();
        tokio::fs::write(&dest_path, &content)
            .await
            .map_err(|e| FetchError::io(&dest_path, e))?;

        self.logger.info(&format!(
            "Downloaded: {} -> {}",
            target.file.name,
            dest_path.display()
        ));
        Ok(content.len() as u64)
    }

    /// Mirrors `folder_path` into `dest_folder/<last segment of folder_path>`.
    pub async fn download_folder(&self, folder_path: &str, dest_folder: &Path) -> Result<DownloadSummary> {
        let mut summary = DownloadSummary::default();

        // Pending (remote folder, local parent) pairs. Subfolders are pushed
        // in reverse so they pop in listing order.
        let mut pending = vec![(folder_path.to_string(), dest_folder.to_path_buf())];

        while let Some((remote, parent)) = pending.pop() {
            self.logger.debug(&format!(
                "Downloading folder: {} to {}",
                remote,
                parent.display()
            ));

            let target_dir = parent.join(last_segment(&remote));
            tokio::fs::create_dir_all(&target_dir)
                .await
                .map_err(|e| FetchError::io(&target_dir, e))?;
            summary.folders += 1;

            let listing = self.list_folder(&remote).await?;

            for file in &listing.files {
                summary.bytes += self
                    .download_file(&file.download_url, &target_dir, &file.name)
                    .await?;
                summary.files += 1;
            }

            for subfolder in listing.folders.iter().rev() {
                pending.push((format!("{}/{}", remote, subfolder), target_dir.clone()));
            }
        }

        Ok(summary)
    }

    /// Downloads the configured folder into the configured destination
    pub async fn run(&self) -> Result<DownloadSummary> {
        self.logger.info(&format!(
            "Starting download for '{}' from branch '{}'...",
            self.coords.folder_path, self.coords.branch
        ));

        let summary = self
            .download_folder(&self.coords.folder_path, &self.dest_folder)
            .await?;

        self.logger.info(&format!(
            "All files from '{}' have been downloaded to '{}'.",
            self.coords.folder_path,
            self.dest_folder.display()
        ));
        Ok(summary)
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a stack instead of recursion?
//    - An async fn cannot call itself without boxing the future
//    - Pushing subfolders in reverse keeps the same visiting order a recursive
//      walk would have: files first, then subfolders one after another
//
// 2. Why is the rate-limit handling not in here?
//    - It applies to every request, so it lives in ApiClient::get
//
// 3. What happens to symlinks and submodules?
//    - GitHub reports them with type "symlink" / "submodule"
//    - We cannot mirror them as plain files, so they are skipped with a warning
// -----------------------------------------------------------------------------
