//! bgit - CLI entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bgit::commit::{
    CommitOptions, CommitOutcome, CommitRequest, CommitResult, execute, prepare_commit,
};
use bgit::config::SynthesisConfig;
use bgit::git::GitRepository;
use bgit::llm::{HttpCompletionClient, MessageSynthesizer};

/// A git front-end that writes commit messages for you.
#[derive(Parser, Debug)]
#[command(name = "bgit")]
#[command(about = "Stage, describe, and commit changes with AI-written messages")]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show staged, unstaged, and untracked paths
    Status,

    /// Stage paths for the next commit
    Add {
        /// Paths to stage
        paths: Vec<String>,

        /// Stage every change, including deletions
        #[arg(short = 'A', long)]
        all: bool,
    },

    /// Commit staged changes
    Commit {
        /// Commit message (skips AI generation)
        #[arg(short, long)]
        message: Option<String>,

        /// Allow a commit with nothing staged
        #[arg(long)]
        allow_empty: bool,

        /// Print what would be committed without writing
        #[arg(long)]
        dry_run: bool,

        /// Never call an AI provider
        #[arg(long)]
        no_ai: bool,

        /// Override the author, as "Name <email>"
        #[arg(long)]
        author: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command).await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(command: Command) -> Result<()> {
    let repo = GitRepository::open(".").context("Run bgit from within a git repository")?;

    match command {
        Command::Status => show_status(&repo),
        Command::Add { paths, all } => add(&repo, &paths, all),
        Command::Commit {
            message,
            allow_empty,
            dry_run,
            no_ai,
            author,
        } => {
            let request = CommitRequest {
                message,
                no_ai,
                options: CommitOptions {
                    allow_empty,
                    dry_run,
                    author,
                },
            };
            commit(&repo, request).await
        }
    }
}

fn show_status(repo: &GitRepository) -> Result<()> {
    let branch = repo
        .current_branch()
        .unwrap_or_else(|| "(no branch)".to_string());
    println!("On branch {}", branch);

    match repo.latest_commit() {
        Some(head) => println!("Last commit: {} {}", head.short_hash, head.subject),
        None => println!("No commits yet"),
    }
    println!();

    let report = repo.classify_status().context("Failed to read status")?;
    print!("{}", report.render());
    Ok(())
}

fn add(repo: &GitRepository, paths: &[String], all: bool) -> Result<()> {
    if all || paths.is_empty() {
        let staged = repo.stage_all().context("Failed to stage changes")?;
        println!("✓ Staged {} paths", staged.len());
        return Ok(());
    }

    let outcome = repo.stage_paths(paths).context("Failed to stage paths")?;
    println!("✓ Staged {} paths", outcome.staged.len());
    for (path, reason) in &outcome.failed {
        eprintln!("  ✗ {}: {}", path, reason);
    }

    if outcome.staged.is_empty() && !outcome.failed.is_empty() {
        anyhow::bail!("No paths could be staged");
    }
    Ok(())
}

async fn commit(repo: &GitRepository, request: CommitRequest) -> Result<()> {
    let config = SynthesisConfig::from_env().context("Invalid AI provider configuration")?;
    let client = HttpCompletionClient::new().context("Failed to initialize HTTP client")?;
    let synthesizer = MessageSynthesizer::new(config, client);

    let prepared = prepare_commit(repo, &synthesizer, request).await?;
    for warning in &prepared.warnings {
        eprintln!("warning: {}", warning);
    }

    let staged = prepared.plan.staged_paths().to_vec();
    match execute(repo, prepared.plan)? {
        CommitOutcome::DryRun(preview) => print!("{}", preview),
        CommitOutcome::Committed(result) => print_commit_summary(&result, &staged),
    }
    Ok(())
}

fn print_commit_summary(result: &CommitResult, staged: &[String]) {
    println!("✓ Committed {}", result.hash);
    println!("  Author: {} <{}>", result.author_name, result.author_email);
    println!("  Date:   {}", result.timestamp.to_rfc3339());
    println!("  {}", result.message_subject);
    if !staged.is_empty() {
        println!("Files:");
        for path in staged {
            println!("  • {}", path);
        }
    }
}
