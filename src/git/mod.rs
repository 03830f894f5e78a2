//! Git operations using git2-rs.

pub mod backend;
pub mod diff;
pub mod status;

pub use backend::{GitRepository, HeadCommit, StageOutcome, VcsBackend};
pub use diff::{DiffCollection, SkippedPath, collect_diff, collect_diff_lenient};
pub use status::{FileState, PathStatus, StatusReport, classify, staged_paths};
