//! Commit validation and planning.

use crate::commit::author::{Author, resolve_author};
use crate::error::CommitError;

/// User-controlled switches for a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitOptions {
    /// Allow a commit with nothing staged.
    pub allow_empty: bool,
    /// Render a preview instead of writing to the repository.
    pub dry_run: bool,
    /// Explicit `Name <email>` author override.
    pub author: Option<String>,
}

/// A validated commit, ready for execution.
///
/// Only [`plan_commit`] constructs plans, so a plan always carries a
/// non-empty message and is either non-empty or explicitly allowed to be
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPlan {
    staged_paths: Vec<String>,
    message: String,
    author: Author,
    allow_empty: bool,
    dry_run: bool,
}

impl CommitPlan {
    pub fn staged_paths(&self) -> &[String] {
        &self.staged_paths
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message.
    pub fn subject(&self) -> &str {
        subject_line(&self.message)
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn allow_empty(&self) -> bool {
        self.allow_empty
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Human-readable preview shown for dry runs.
    pub fn preview(&self) -> String {
        let mut out = String::from("Dry run commit preview:\n");
        out.push_str("Message:\n");
        out.push_str(&format!("  {}\n", self.subject()));
        out.push_str("Files:\n");
        if self.staged_paths.is_empty() {
            out.push_str("  (none; empty commit would be created)\n");
        } else {
            for path in &self.staged_paths {
                out.push_str(&format!("  • {}\n", path));
            }
        }
        out
    }
}

/// Reject a commit with nothing staged unless empty commits are allowed.
pub fn ensure_committable(staged_paths: &[String], allow_empty: bool) -> Result<(), CommitError> {
    if staged_paths.is_empty() && !allow_empty {
        return Err(CommitError::NothingToCommit);
    }
    Ok(())
}

/// Validate inputs and build a [`CommitPlan`].
///
/// The author is resolved here, once, so execution never consults the
/// environment.
pub fn plan_commit(
    staged_paths: Vec<String>,
    message: impl Into<String>,
    options: &CommitOptions,
) -> Result<CommitPlan, CommitError> {
    ensure_committable(&staged_paths, options.allow_empty)?;

    let message = message.into().trim().to_string();
    if message.is_empty() {
        return Err(CommitError::MessageRequired);
    }

    Ok(CommitPlan {
        staged_paths,
        message,
        author: resolve_author(options.author.as_deref()),
        allow_empty: options.allow_empty,
        dry_run: options.dry_run,
    })
}

/// First line of a commit message.
pub(crate) fn subject_line(message: &str) -> &str {
    message.lines().next().unwrap_or("").trim()
}
