//! bgit - a git front-end that writes commit messages for you.
//!
//! # Overview
//!
//! bgit classifies working-tree status, collects staged diffs, asks a chain
//! of text-generation providers for a commit message (falling back to a
//! deterministic summary when none answers), and commits through libgit2.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;

// Re-export commonly used types
pub use commit::{CommitOptions, CommitOutcome, CommitPlan, CommitRequest, CommitResult};
pub use config::SynthesisConfig;
pub use error::{CommitError, ConfigError, GitError, ProviderError};
pub use git::{GitRepository, StatusReport, VcsBackend};
pub use llm::{MessageSynthesizer, Provider, ProviderWarning, Synthesis};
