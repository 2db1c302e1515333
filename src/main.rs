//! gitbrief - CLI entry point.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use gitbrief::git::check_git_installed;
use gitbrief::{ChangeConfig, ChangeInterface, CommitProposal, GitError, summarize};

/// Summarize working-tree changes and commit structured proposals.
#[derive(Parser, Debug)]
#[command(name = "gitbrief")]
#[command(about = "Summarize working-tree changes and commit structured proposals")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Repository root to operate in
    #[arg(short = 'C', long, global = true, default_value = ".")]
    repo: PathBuf,

    /// Diff timeout in seconds (overrides GITBRIEF_DIFF_TIMEOUT)
    #[arg(long, global = true)]
    diff_timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the fixed-width change summary
    Status {
        /// Print the change list as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Print the diff against HEAD
    Diff {
        /// Restrict the diff to one path
        path: Option<String>,
    },

    /// Stage the given paths
    Stage {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Print the commit message for a proposal
    Format {
        /// Proposal JSON file, or `-` for stdin
        proposal: PathBuf,
    },

    /// Stage a proposal's files and commit its message
    Commit {
        /// Proposal JSON file, or `-` for stdin
        proposal: PathBuf,

        /// Push after committing
        #[arg(long)]
        push: bool,

        /// Skip the push confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,

        /// Print the message and files without touching the repository
        #[arg(long)]
        dry_run: bool,
    },
}

impl Command {
    /// Whether the subcommand spawns git. `format` and `commit --dry-run` only read the proposal.
    fn needs_git(&self) -> bool {
        !matches!(
            self,
            Command::Format { .. } | Command::Commit { dry_run: true, .. }
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut config = ChangeConfig::from_env(&cli.repo);
    if let Some(secs) = cli.diff_timeout {
        config = config.with_diff_timeout(Duration::from_secs(secs));
    }

    if cli.command.needs_git() {
        check_git_installed(&config.git_binary)
            .await
            .context("git is required")?;
    }
    run(ChangeInterface::new(config), cli.command).await
}

/// Dispatch a subcommand. `format` and `commit --dry-run` never touch the repository.
async fn run(changes: ChangeInterface, command: Command) -> Result<()> {
    match command {
        Command::Status { json } => {
            let files = changes
                .list_changes()
                .await
                .context("Failed to list changes")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&files)?);
            } else if files.is_empty() {
                eprintln!("Working tree is clean.");
            } else {
                println!("{}", summarize(&files));
            }
        }
        Command::Diff { path } => match changes.get_diff(path.as_deref()).await {
            Ok(diff) => print!("{}", diff),
            Err(e @ GitError::Timeout { .. }) => {
                bail!("{e}. The diff may be too large; try a single path or raise --diff-timeout.")
            }
            Err(e) => return Err(e).context("Failed to get diff"),
        },
        Command::Stage { paths } => {
            changes
                .try_stage(paths.as_slice())
                .await
                .context("Failed to stage paths")?;
            eprintln!("Staged {} path(s).", paths.len());
        }
        Command::Commit {
            proposal,
            dry_run: true,
            ..
        } => print_dry_run(&proposal)?,
        Command::Commit {
            proposal, push, yes, ..
        } => {
            let proposal = read_proposal(&proposal)?;
            let outcome = changes
                .apply_proposal(&proposal)
                .await
                .context("Failed to commit proposal")?;
            println!("{}", outcome.short_hash);

            if push && (yes || confirm_push()?) {
                changes.try_push().await.context("Failed to push")?;
                eprintln!("✓ Pushed {}", outcome.short_hash);
            }
        }
        Command::Format { proposal } => print_message(&proposal)?,
    }

    Ok(())
}

fn print_message(path: &Path) -> Result<()> {
    let proposal = read_proposal(path)?;
    print!("{}", proposal.format());
    Ok(())
}

fn print_dry_run(path: &Path) -> Result<()> {
    let proposal = read_proposal(path)?;
    println!("--- Dry Run: message ---\n{}", proposal.format());
    println!("--- Dry Run: files ---");
    for file in &proposal.files {
        println!("{}", file);
    }
    Ok(())
}

fn read_proposal(path: &Path) -> Result<CommitProposal> {
    CommitProposal::from_path(path)
        .with_context(|| format!("Failed to read proposal from {}", path.display()))
}

fn confirm_push() -> Result<bool> {
    Confirm::new()
        .with_prompt("Push to upstream?")
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

/// Set up logging/tracing on stderr.
fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_new("gitbrief=debug,warn").unwrap_or_else(|_| EnvFilter::new("warn"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
