// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr + optional log file)
// 3. Either run the interactive prompts (no URL given) or use the URL directly
// 4. List branches or download the folder, then print a summary
// 5. Exit with proper code (0 = success, 1 = error)
// =============================================================================

mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - validated settings for one run
mod error;         // src/error.rs - FetchError
mod github;        // src/github/ - URL parsing, API client, folder download
mod interactive;   // src/interactive.rs - prompt flow
mod logger;        // src/logger.rs - injected logging capability

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::Config;
use error::FetchError;
use github::DownloadSummary;
use logger::TracingLogger;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(hint) = e.downcast_ref::<FetchError>().and_then(hint_for) {
                eprintln!("Hint: {}", hint);
            }
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_cli(&cli)?;
    let logger = TracingLogger::shared();

    let summary = match &config.github_url {
        None => match interactive::run(&config, logger).await? {
            Some(summary) => summary,
            None => return Ok(()),
        },
        Some(url) => {
            let downloader = github::downloader_for(
                url,
                &config.dest_folder,
                config.token.clone(),
                config.api_url.clone(),
                logger.clone(),
            )?;

            if config.list_branches {
                let branches = downloader.list_branches().await?;
                logger.info(&format!("Available branches: {}", branches.join(", ")));
                interactive::print_branches(&branches);
                return Ok(());
            }

            downloader
                .run()
                .await
                .with_context(|| format!("Downloading {} failed", url))?
        }
    };

    print_summary(&summary);
    Ok(())
}

// Logs go to stderr, and unless --no_log_file to the log file as well.
// RUST_LOG wins over --verbose.
fn init_tracing(cli: &Cli) {
    let default_filter = if cli.verbose {
        "gh_folder=debug"
    } else {
        "gh_folder=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let file_layer = if cli.no_log_file {
        None
    } else {
        match OpenOptions::new().create(true).append(true).open(&cli.log_file) {
            Ok(file) => Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false),
            ),
            Err(e) => {
                eprintln!(
                    "Warning: could not open log file {}: {}",
                    cli.log_file.display(),
                    e
                );
                None
            }
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

fn hint_for(error: &FetchError) -> Option<&'static str> {
    match error {
        FetchError::MalformedUrl { .. } => {
            Some("Copy the URL from the folder's page on github.com (it contains /tree/<branch>/)")
        }
        _ => match error.status() {
            Some(404) => Some("Check the branch and folder name; private repositories need --token"),
            Some(401) => Some("The token was rejected, generate a new one at https://github.com/settings/tokens"),
            Some(403) => Some("Access denied or rate limited; authenticating with --token raises the limit"),
            _ => None,
        },
    }
}

fn print_summary(summary: &DownloadSummary) {
    println!();
    println!("📊 Summary:");
    println!("   📁 Folders: {}", summary.folders);
    println!("   📄 Files: {}", summary.files);
    println!("   💾 Bytes: {}", summary.bytes);
}
