//! The `commit` flow: status, validation, message, plan.

use tracing::{debug, info};

use crate::commit::plan::{CommitOptions, CommitPlan, ensure_committable, plan_commit};
use crate::error::CommitError;
use crate::git::backend::VcsBackend;
use crate::git::diff::collect_diff;
use crate::git::status::staged_paths;
use crate::llm::client::CompletionClient;
use crate::llm::synthesizer::{MessageSynthesizer, ProviderWarning};

/// Inputs for one commit invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitRequest {
    /// Explicit message; skips synthesis entirely.
    pub message: Option<String>,
    /// Never call a provider.
    pub no_ai: bool,
    pub options: CommitOptions,
}

/// A plan plus the provider warnings gathered while producing its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCommit {
    pub plan: CommitPlan,
    pub warnings: Vec<ProviderWarning>,
}

/// Turn the repository state and `request` into a [`CommitPlan`].
///
/// The staged set is validated before any diff is read or provider is
/// called.
pub async fn prepare_commit<B, C>(
    backend: &B,
    synthesizer: &MessageSynthesizer<C>,
    request: CommitRequest,
) -> Result<PreparedCommit, CommitError>
where
    B: VcsBackend + ?Sized,
    C: CompletionClient,
{
    let raw = backend.status()?;
    let staged = staged_paths(&raw);
    debug!("{} staged paths", staged.len());

    ensure_committable(&staged, request.options.allow_empty)?;

    let mut warnings = Vec::new();
    let message = match request.message.filter(|m| !m.trim().is_empty()) {
        Some(message) => message,
        None if request.no_ai => return Err(CommitError::MessageRequired),
        None => {
            let diff = collect_diff(backend, &staged)?;
            let synthesis = synthesizer.synthesize(&diff, &staged).await;
            info!("Commit message generated by {}", synthesis.source);
            warnings = synthesis.warnings;
            synthesis.message
        }
    };

    let plan = plan_commit(staged, message, &request.options)?;
    Ok(PreparedCommit { plan, warnings })
}
