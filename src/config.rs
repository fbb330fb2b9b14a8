// src/config.rs
// =============================================================================
// Settings for one run, built from the parsed command line.
//
// The CLI struct is what the user typed; Config is what the rest of the
// program works with: the API root is a parsed Url, the destination is a
// concrete directory and an empty token counts as "no token".
// =============================================================================

use crate::cli::Cli;
use anyhow::{Context, Result};
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_url: Option<String>,
    pub dest_folder: PathBuf,
    pub token: Option<String>,
    pub api_url: Url,
    pub list_branches: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let dest_folder = match &cli.dest_folder {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Could not determine the current directory")?,
        };

        Ok(Config {
            github_url: cli.github_url.clone(),
            dest_folder,
            token: non_empty(cli.token.as_deref()),
            api_url: parse_api_url(&cli.api_url)?,
            list_branches: cli.list_branches,
        })
    }
}

/// Trimmed value, or None when nothing is left
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Invalid --api_url '{}'", raw))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("Invalid --api_url '{}': expected an http(s) URL", raw);
    }
    Ok(url)
}
