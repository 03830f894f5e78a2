//! Version-control backend: the trait the commit flow talks to, and its git2
//! implementation.

use std::path::Path;

use chrono::{DateTime, FixedOffset};
use git2::{
    Commit, DiffFormat, DiffOptions, ErrorCode, IndexAddOption, Oid, Repository, Signature,
    StatusOptions, Time, Tree,
};
use tracing::debug;

use crate::commit::author::Author;
use crate::commit::executor::CommitResult;
use crate::error::GitError;
use crate::git::status::{PathStatus, StatusReport, classify, staged_paths};

/// Reason recorded for a path that is neither on disk nor in the index.
const UNMATCHED_PATHSPEC: &str = "pathspec did not match any files";

/// Primitives the commit flow consumes from a version-control backend.
///
/// This abstraction allows mocking the repository in tests.
#[cfg_attr(test, mockall::automock)]
pub trait VcsBackend {
    /// Status of every path with uncommitted state.
    fn status(&self) -> Result<Vec<PathStatus>, GitError>;

    /// Unified diff of the staged changes for exactly one path.
    fn diff_path(&self, path: &str) -> Result<String, GitError>;

    /// Write a commit from the current index on HEAD, using `author` as both
    /// author and committer. Returns the new commit's hex id.
    fn create_commit(
        &self,
        message: &str,
        author: &Author,
        when: DateTime<FixedOffset>,
    ) -> Result<String, git2::Error>;

    /// Read a commit back by hex id.
    fn find_commit(&self, hash: &str) -> Result<CommitResult, git2::Error>;
}

/// Result of staging an explicit list of paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageOutcome {
    pub staged: Vec<String>,
    /// Paths that could not be staged, with the reason.
    pub failed: Vec<(String, String)>,
}

/// Short description of the HEAD commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadCommit {
    pub short_hash: String,
    pub subject: String,
}

/// A git2-backed repository.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open the repository rooted at `path`.
    ///
    /// A missing repository is reported as [`GitError::NotARepository`] so
    /// callers can tell it apart from other open failures.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                GitError::NotARepository {
                    path: path.display().to_string(),
                }
            } else {
                GitError::OpenRepository(e)
            }
        })?;
        Ok(Self::from_repository(repo))
    }

    /// Wrap an already opened repository.
    pub fn from_repository(repo: Repository) -> Self {
        Self { repo }
    }

    /// Query and classify the working tree status.
    pub fn classify_status(&self) -> Result<StatusReport, GitError> {
        Ok(classify(&self.status()?))
    }

    /// Stage every change in the working tree, deletions included.
    ///
    /// Returns the paths staged afterwards.
    pub fn stage_all(&self) -> Result<Vec<String>, GitError> {
        let mut index = self.repo.index().map_err(GitError::StagingFailed)?;
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .map_err(GitError::StagingFailed)?;
        index
            .update_all(["*"].iter(), None)
            .map_err(GitError::StagingFailed)?;
        index.write().map_err(GitError::StagingFailed)?;

        Ok(staged_paths(&self.status()?))
    }

    /// Stage the given repository-relative paths.
    ///
    /// Paths missing from the working directory are removed from the index
    /// (a staged deletion); paths unknown to both are failures. A failure on
    /// one path does not stop the others.
    pub fn stage_paths(&self, paths: &[String]) -> Result<StageOutcome, GitError> {
        let workdir = self
            .repo
            .workdir()
            .ok_or_else(|| {
                GitError::StagingFailed(git2::Error::from_str("cannot stage in a bare repository"))
            })?
            .to_path_buf();

        let mut index = self.repo.index().map_err(GitError::StagingFailed)?;
        let mut outcome = StageOutcome::default();

        for path in paths {
            let relative = Path::new(path);
            let result = if workdir.join(relative).exists() {
                index.add_path(relative)
            } else if index.get_path(relative, 0).is_some() {
                index.remove_path(relative)
            } else {
                Err(git2::Error::from_str(UNMATCHED_PATHSPEC))
            };

            match result {
                Ok(()) => outcome.staged.push(path.clone()),
                Err(e) => outcome.failed.push((path.clone(), e.message().to_string())),
            }
        }

        index.write().map_err(GitError::StagingFailed)?;
        Ok(outcome)
    }

    /// Current branch name, or the abbreviated HEAD id when detached.
    pub fn current_branch(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        if head.is_branch() {
            return head.shorthand().map(str::to_string);
        }
        let oid = head.target()?.to_string();
        Some(oid[..12].to_string())
    }

    /// The commit HEAD points at, if any.
    pub fn latest_commit(&self) -> Option<HeadCommit> {
        let commit = self.repo.head().ok()?.peel_to_commit().ok()?;
        let hash = commit.id().to_string();
        Some(HeadCommit {
            short_hash: hash[..12].to_string(),
            subject: commit_subject(&commit),
        })
    }
}

impl VcsBackend for GitRepository {
    fn status(&self) -> Result<Vec<PathStatus>, GitError> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .renames_head_to_index(true);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(GitError::StatusFailed)?;

        let mut entries = Vec::with_capacity(statuses.len());
        for entry in statuses.iter() {
            let status = entry.status();

            // For renames, report the destination path.
            let renamed_to = if status.is_index_renamed() {
                entry
                    .head_to_index()
                    .and_then(|delta| delta.new_file().path())
                    .map(|p| p.to_string_lossy().to_string())
            } else {
                None
            };

            let path = match renamed_to {
                Some(path) => path,
                None => String::from_utf8_lossy(entry.path_bytes()).to_string(),
            };

            entries.push(PathStatus::from_git2(path, status));
        }

        Ok(entries)
    }

    fn diff_path(&self, path: &str) -> Result<String, GitError> {
        let diff_failed = |source| GitError::DiffFailed {
            path: path.to_string(),
            source,
        };

        let head_tree = resolve_head_tree(&self.repo).map_err(diff_failed)?;

        let mut opts = DiffOptions::new();
        opts.pathspec(path).disable_pathspec_match(true);
        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), None, Some(&mut opts))
            .map_err(diff_failed)?;

        let mut text = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            let origin = line.origin();
            if origin == '+' || origin == '-' || origin == ' ' {
                text.push(origin);
            }
            text.push_str(&String::from_utf8_lossy(line.content()));
            true
        })
        .map_err(diff_failed)?;

        debug!("Diff for {}: {} bytes", path, text.len());
        Ok(text)
    }

    fn create_commit(
        &self,
        message: &str,
        author: &Author,
        when: DateTime<FixedOffset>,
    ) -> Result<String, git2::Error> {
        let offset_minutes = when.offset().local_minus_utc() / 60;
        let time = Time::new(when.timestamp(), offset_minutes);
        let sig = Signature::new(&author.name, &author.email, &time)?;

        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                None
            }
            Err(e) => return Err(e),
        };
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;
        Ok(oid.to_string())
    }

    fn find_commit(&self, hash: &str) -> Result<CommitResult, git2::Error> {
        let oid = Oid::from_str(hash)?;
        let commit = self.repo.find_commit(oid)?;
        let author = commit.author();

        let when = author.when();
        let offset = FixedOffset::east_opt(when.offset_minutes() * 60)
            .ok_or_else(|| git2::Error::from_str("commit has an invalid timezone offset"))?;
        let timestamp = DateTime::from_timestamp(when.seconds(), 0)
            .ok_or_else(|| git2::Error::from_str("commit has an invalid timestamp"))?
            .with_timezone(&offset);

        Ok(CommitResult {
            hash: commit.id().to_string(),
            author_name: String::from_utf8_lossy(author.name_bytes()).to_string(),
            author_email: String::from_utf8_lossy(author.email_bytes()).to_string(),
            timestamp,
            message_subject: commit_subject(&commit),
        })
    }
}

/// Resolve the HEAD tree, treating an unborn branch as "no tree yet".
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, git2::Error> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    Ok(Some(head_ref.peel_to_tree()?))
}

fn commit_subject(commit: &Commit<'_>) -> String {
    let message = String::from_utf8_lossy(commit.message_bytes());
    message.lines().next().unwrap_or_default().to_string()
}
