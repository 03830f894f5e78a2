//! Commit execution against a [`VcsBackend`].

use chrono::{DateTime, FixedOffset, Local};
use tracing::debug;

use crate::commit::plan::CommitPlan;
use crate::error::CommitError;
use crate::git::backend::VcsBackend;

/// Details of a commit as read back from the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitResult {
    /// Full hex object id.
    pub hash: String,
    pub author_name: String,
    pub author_email: String,
    pub timestamp: DateTime<FixedOffset>,
    pub message_subject: String,
}

/// What [`execute`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The rendered preview; the repository was not touched.
    DryRun(String),
    Committed(CommitResult),
}

/// Execute a plan.
///
/// Dry runs return the preview without calling the backend. Otherwise the
/// commit is created with the plan's author as author and committer at the
/// current local time, then read back.
pub fn execute<B: VcsBackend + ?Sized>(
    backend: &B,
    plan: CommitPlan,
) -> Result<CommitOutcome, CommitError> {
    if plan.is_dry_run() {
        return Ok(CommitOutcome::DryRun(plan.preview()));
    }

    let now = Local::now().fixed_offset();
    let hash = backend
        .create_commit(plan.message(), plan.author(), now)
        .map_err(CommitError::CommitFailed)?;
    debug!("Created commit {}", hash);

    let result = backend
        .find_commit(&hash)
        .map_err(|source| CommitError::CommitUnreadable {
            hash: hash.clone(),
            source,
        })?;

    Ok(CommitOutcome::Committed(result))
}
