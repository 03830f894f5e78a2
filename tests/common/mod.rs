//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use git2::{Oid, Repository, Signature};

use bgit::config::SynthesisConfig;
use bgit::git::GitRepository;
use bgit::llm::{HttpCompletionClient, MessageSynthesizer, Provider};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open the repository through the library under test.
    pub fn open(&self) -> GitRepository {
        GitRepository::open(self.path()).expect("Failed to open test repo")
    }

    /// Write `content` to a repository-relative path, creating parent dirs.
    pub fn write(&self, path: &str, content: &str) {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(full, content).expect("Failed to write test file");
    }

    pub fn remove(&self, path: &str) {
        std::fs::remove_file(self.path().join(path)).expect("Failed to remove test file");
    }

    /// Stage `paths` directly through git2.
    pub fn stage(&self, paths: &[&str]) {
        let mut index = self.repo.index().expect("Failed to get index");
        for path in paths {
            index.add_path(Path::new(path)).expect("Failed to add file");
        }
        index.write().expect("Failed to write index");
    }

    /// Commit the current index with a fixed test signature.
    pub fn commit(&self, message: &str) -> Oid {
        let sig =
            Signature::now("Test User", "test@example.com").expect("Failed to create signature");

        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Write, stage, and commit files in one step.
    pub fn commit_files(&self, files: &[(&str, &str)], message: &str) -> Oid {
        for (path, content) in files {
            self.write(path, content);
        }
        let paths: Vec<&str> = files.iter().map(|(p, _)| *p).collect();
        self.stage(&paths);
        self.commit(message)
    }

    pub fn head(&self) -> Option<Oid> {
        self.repo.head().ok().and_then(|h| h.target())
    }

    pub fn commit_count(&self) -> usize {
        let Some(head) = self.head() else {
            return 0;
        };
        let mut walk = self.repo.revwalk().expect("Failed to create revwalk");
        walk.push(head).expect("Failed to push HEAD");
        walk.count()
    }
}

/// A synthesizer with no providers, so messages always come from the heuristic.
pub fn offline_synthesizer() -> MessageSynthesizer<HttpCompletionClient> {
    let config = SynthesisConfig::new(Vec::<Provider>::new(), Duration::from_secs(1));
    let client = HttpCompletionClient::new().expect("Failed to build HTTP client");
    MessageSynthesizer::new(config, client)
}
