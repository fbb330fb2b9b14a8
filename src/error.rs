// src/error.rs
// =============================================================================
// Error types for the download core.
//
// Every failure here is fatal for the run: the tree walk stops at the first
// error and main() turns it into a non-zero exit code. Rate-limit exhaustion is
// not an error at all, it is handled by sleeping (see github/rate_limit.rs).
//
// Rust concepts:
// - thiserror: derive Display/Error impls from attributes
// - #[from]: lets the ? operator convert reqwest errors automatically
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// The shape every input URL has to follow.
pub const URL_SHAPE: &str = "https://github.com/<owner>/<repo>/tree/<branch>/<folder>";

#[derive(Error, Debug)]
pub enum FetchError {
    /// The input URL does not match [`URL_SHAPE`]
    #[error("Invalid URL format '{url}'. Ensure it follows '{}'", URL_SHAPE)]
    MalformedUrl { url: String },

    /// A listing or branch-listing call came back with a non-2xx status
    #[error("GitHub API request to {url} failed. Status Code: {status}")]
    Api { url: String, status: u16 },

    /// A raw file download came back with a non-2xx status
    #[error("Download of {url} failed. Status Code: {status}")]
    Download { url: String, status: u16 },

    /// The request never produced a response (DNS, TLS, connection reset...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The body was not the JSON shape we expected
    #[error("Unexpected response from {url}: {source}")]
    UnexpectedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Filesystem error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Repository '{repository}' has no branches")]
    NoBranches { repository: String },
}

impl FetchError {
    /// Wraps an io::Error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Api { status, .. } | FetchError::Download { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
