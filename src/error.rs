//! Error types for bgit modules using thiserror.

use std::time::Duration;

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("No git repository found at {path}")]
    NotARepository { path: String },

    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to compute status: {0}")]
    StatusFailed(#[source] git2::Error),

    #[error("Failed to collect diff for '{path}': {source}")]
    DiffFailed {
        path: String,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to stage changes: {0}")]
    StagingFailed(#[source] git2::Error),
}

/// Errors from a single text-generation provider call.
///
/// These never abort a commit: the synthesizer turns them into warnings and
/// moves on to the next provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{0} not set")]
    MissingCredential(String),

    #[error("Provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Provider request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Provider returned no response content")]
    EmptyResponse,

    #[error("Provider call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Errors from commit planning and execution.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("No staged changes to commit (use 'bgit add' or --allow-empty)")]
    NothingToCommit,

    #[error("Commit message required (provide -m or enable AI)")]
    MessageRequired,

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Commit {hash} created but retrieval failed: {source}")]
    CommitUnreadable {
        hash: String,
        #[source]
        source: git2::Error,
    },
}

/// Errors from environment-driven configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown AI provider '{0}' (expected one of: OpenAI, OpenRouter)")]
    UnknownProvider(String),
}
