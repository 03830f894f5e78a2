//! Commit planning and execution.

pub mod author;
pub mod executor;
pub mod heuristic;
pub mod plan;
pub mod workflow;

pub use author::{Author, parse_author, resolve_author};
pub use executor::{CommitOutcome, CommitResult, execute};
pub use heuristic::heuristic_message;
pub use plan::{CommitOptions, CommitPlan, ensure_committable, plan_commit};
pub use workflow::{CommitRequest, PreparedCommit, prepare_commit};
