// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
//   gh-folder <GITHUB_URL> [--dest_folder DIR] [--token TOKEN] [--list_branches]
//   gh-folder                      (no URL: interactive prompts)
//
// Flag names use underscores (--dest_folder, --list_branches) to stay
// compatible with the scripts people already have for this tool.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

/// Default GitHub REST API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default log file, written next to where the tool is run
pub const DEFAULT_LOG_FILE: &str = "github_downloader.log";

#[derive(Parser, Debug)]
#[command(
    name = "gh-folder",
    version,
    about = "Download a specific folder from a GitHub repository",
    long_about = "gh-folder downloads one folder (and all of its subfolders) from a GitHub \
                  repository without cloning the whole repository. Run it without a URL \
                  to be prompted for the details."
)]
pub struct Cli {
    /// The URL of the GitHub folder, e.g.
    /// https://github.com/owner/repo/tree/main/path/to/folder
    ///
    /// When omitted, the tool asks for it interactively
    pub github_url: Option<String>,

    /// The destination folder (default is current directory)
    #[arg(long = "dest_folder", value_name = "DIR")]
    pub dest_folder: Option<PathBuf>,

    /// GitHub Personal Access Token for authentication
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// List available branches and exit
    #[arg(long = "list_branches")]
    pub list_branches: bool,

    /// Root of the GitHub REST API (GitHub Enterprise: https://HOST/api/v3)
    #[arg(long = "api_url", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Also write log lines to this file
    #[arg(long = "log_file", value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Do not write a log file
    #[arg(long = "no_log_file", conflicts_with = "log_file")]
    pub no_log_file: bool,

    /// Show debug output (RUST_LOG overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}
