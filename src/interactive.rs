// src/interactive.rs
// =============================================================================
// The prompt flow used when no URL is given on the command line.
//
// What happens here:
// 1. Ask for the GitHub URL, the destination folder and (if not already
//    supplied) a token
// 2. Fetch the repository's branches
// 3. If the branch from the URL does not exist, fall back to the first one
// 4. Either print the branches (--list_branches) or download the folder
//
// The question/answer part is generic over BufRead/Write so tests can feed
// it canned input instead of a terminal.
// =============================================================================

use crate::config::{non_empty, Config};
use crate::error::FetchError;
use crate::github::{self, DownloadSummary};
use crate::logger::Logger;
use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// What the user typed at the prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub github_url: String,
    pub dest_folder: PathBuf,
    pub token: Option<String>,
}

/// Asks the three questions. Empty answers fall back to `config`.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, config: &Config) -> Result<Answers> {
    let github_url = ask(input, output, "Enter the GitHub URL: ")?;
    if github_url.is_empty() {
        bail!("No GitHub URL given");
    }

    let dest_question = format!(
        "Enter the destination folder (default is {}): ",
        config.dest_folder.display()
    );
    let dest_folder = match ask(input, output, &dest_question)?.as_str() {
        "" => config.dest_folder.clone(),
        dir => PathBuf::from(dir),
    };

    let token = match &config.token {
        Some(token) => Some(token.clone()),
        None => non_empty(Some(&ask(
            input,
            output,
            "Enter your GitHub Personal Access Token (or press Enter to skip): ",
        )?)),
    };

    Ok(Answers {
        github_url,
        dest_folder,
        token,
    })
}

// Prints the question and reads one trimmed line; EOF reads as empty
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{}", question).context("Could not write prompt")?;
    output.flush().context("Could not write prompt")?;

    let mut line = String::new();
    input.read_line(&mut line).context("Could not read answer")?;
    Ok(line.trim().to_string())
}

/// The branch to download from: `requested` when the repository has it,
/// otherwise the first listed branch. None when there are no branches.
pub fn select_branch<'a>(requested: &'a str, branches: &'a [String]) -> Option<&'a str> {
    if branches.iter().any(|b| b == requested) {
        Some(requested)
    } else {
        branches.first().map(String::as_str)
    }
}

/// Runs the whole interactive flow against stdin/stdout.
///
/// Returns None when only the branch list was requested.
pub async fn run(config: &Config, logger: Arc<dyn Logger>) -> Result<Option<DownloadSummary>> {
    let answers = {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        prompt(&mut stdin.lock(), &mut stdout.lock(), config)?
    };

    let mut downloader = github::downloader_for(
        &answers.github_url,
        &answers.dest_folder,
        answers.token,
        config.api_url.clone(),
        logger.clone(),
    )?;

    logger.info(&format!(
        "Fetching available branches for {}...",
        downloader.coords().repository
    ));
    let branches = downloader.list_branches().await?;
    logger.info(&format!("Available branches: {}", branches.join(", ")));

    if config.list_branches {
        print_branches(&branches);
        return Ok(None);
    }

    let requested = downloader.coords().branch.clone();
    let branch = select_branch(&requested, &branches)
        .ok_or_else(|| FetchError::NoBranches {
            repository: downloader.coords().repository.clone(),
        })?
        .to_string();
    if branch != requested {
        logger.warning(&format!("Invalid branch. Defaulting to '{}'.", branch));
        downloader.set_branch(&branch);
    }

    Ok(Some(downloader.run().await?))
}

/// One branch per line on stdout
pub fn print_branches(branches: &[String]) {
    for branch in branches {
        println!("{}", branch);
    }
}
