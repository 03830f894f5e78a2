//! Working tree status classification.
//!
//! Raw per-path status entries carry two independent axes: the staging state
//! (HEAD vs. index) and the worktree state (index vs. working directory).
//! [`classify`] routes each axis into its own category, so a path that was
//! staged and then edited again shows up in both `staged` and `modified`.

use git2::Status;

/// State of a path on one axis (staging or worktree).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Unmodified,
    Modified,
    Added,
    Deleted,
    Renamed,
    Untracked,
}

/// A single path with uncommitted state, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStatus {
    pub path: String,
    pub staging: FileState,
    pub worktree: FileState,
}

impl PathStatus {
    pub fn new(path: impl Into<String>, staging: FileState, worktree: FileState) -> Self {
        Self {
            path: path.into(),
            staging,
            worktree,
        }
    }

    /// Build a status entry from libgit2 status flags.
    pub fn from_git2(path: impl Into<String>, status: Status) -> Self {
        let (staging, worktree) = if status.is_conflicted() {
            (FileState::Modified, FileState::Modified)
        } else {
            (staging_state(status), worktree_state(status))
        };
        Self::new(path, staging, worktree)
    }

    /// Whether anything about this path is recorded in the index.
    pub fn is_staged(&self) -> bool {
        self.staging != FileState::Unmodified
    }
}

fn staging_state(status: Status) -> FileState {
    if status.is_index_new() {
        FileState::Added
    } else if status.is_index_modified() || status.is_index_typechange() {
        FileState::Modified
    } else if status.is_index_deleted() {
        FileState::Deleted
    } else if status.is_index_renamed() {
        FileState::Renamed
    } else {
        FileState::Unmodified
    }
}

fn worktree_state(status: Status) -> FileState {
    if status.is_wt_new() {
        FileState::Untracked
    } else if status.is_wt_modified() || status.is_wt_typechange() {
        FileState::Modified
    } else if status.is_wt_deleted() {
        FileState::Deleted
    } else if status.is_wt_renamed() {
        FileState::Renamed
    } else {
        FileState::Unmodified
    }
}

/// Categorized view of the working tree.
///
/// Each list is sorted and free of duplicates. The categories are not
/// mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub staged: Vec<String>,
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
    pub renamed: Vec<String>,
    pub untracked: Vec<String>,
}

impl StatusReport {
    /// True when no path has uncommitted state.
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    /// Number of entries across all categories (a path may count twice).
    pub fn total(&self) -> usize {
        self.staged.len()
            + self.added.len()
            + self.modified.len()
            + self.deleted.len()
            + self.renamed.len()
            + self.untracked.len()
    }

    /// Render the report as titled sections, skipping empty ones.
    ///
    /// A clean report renders as a single "Working tree clean" line.
    pub fn render(&self) -> String {
        if self.is_clean() {
            return "Working tree clean\n".to_string();
        }

        let sections: [(&str, &[String]); 6] = [
            ("Staged (index)", &self.staged),
            ("Added (staged new files)", &self.added),
            ("Modified (worktree)", &self.modified),
            ("Deleted", &self.deleted),
            ("Renamed", &self.renamed),
            ("Untracked", &self.untracked),
        ];

        let mut out = String::new();
        for (title, items) in sections {
            if items.is_empty() {
                continue;
            }
            out.push_str(&format!("{} ({})\n", title, items.len()));
            for item in items {
                out.push_str("  • ");
                out.push_str(item);
                out.push('\n');
            }
        }
        out
    }
}

/// Classify raw status entries into a [`StatusReport`].
pub fn classify(raw: &[PathStatus]) -> StatusReport {
    let mut report = StatusReport::default();

    for entry in raw {
        let path = entry.path.clone();

        match entry.staging {
            FileState::Unmodified => {}
            FileState::Modified => report.staged.push(path.clone()),
            FileState::Added => report.added.push(path.clone()),
            FileState::Deleted => report.deleted.push(path.clone()),
            FileState::Renamed => report.renamed.push(path.clone()),
            // Rare, but some backends report it.
            FileState::Untracked => report.untracked.push(path.clone()),
        }

        match entry.worktree {
            FileState::Unmodified => {}
            FileState::Modified => report.modified.push(path),
            // An added-but-unstaged file looks the same as a brand new one.
            FileState::Added | FileState::Untracked => report.untracked.push(path),
            FileState::Deleted => report.deleted.push(path),
            FileState::Renamed => report.renamed.push(path),
        }
    }

    for list in [
        &mut report.staged,
        &mut report.added,
        &mut report.modified,
        &mut report.deleted,
        &mut report.renamed,
        &mut report.untracked,
    ] {
        list.sort();
        list.dedup();
    }

    report
}

/// Paths with any staged change, sorted and deduplicated.
pub fn staged_paths(raw: &[PathStatus]) -> Vec<String> {
    let mut paths: Vec<String> = raw
        .iter()
        .filter(|entry| entry.is_staged())
        .map(|entry| entry.path.clone())
        .collect();
    paths.sort();
    paths.dedup();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, staging: FileState, worktree: FileState) -> PathStatus {
        PathStatus::new(path, staging, worktree)
    }

    #[test]
    fn test_classify_empty_is_clean() {
        let report = classify(&[]);
        assert!(report.is_clean());
        assert_eq!(report, StatusReport::default());
        assert_eq!(report.render(), "Working tree clean\n");
    }

    #[test]
    fn test_classify_routes_staging_axis() {
        let raw = vec![
            entry("m.rs", FileState::Modified, FileState::Unmodified),
            entry("a.rs", FileState::Added, FileState::Unmodified),
            entry("d.rs", FileState::Deleted, FileState::Unmodified),
            entry("r.rs", FileState::Renamed, FileState::Unmodified),
            entry("u.rs", FileState::Untracked, FileState::Unmodified),
        ];
        let report = classify(&raw);

        assert_eq!(report.staged, vec!["m.rs"]);
        assert_eq!(report.added, vec!["a.rs"]);
        assert_eq!(report.deleted, vec!["d.rs"]);
        assert_eq!(report.renamed, vec!["r.rs"]);
        assert_eq!(report.untracked, vec!["u.rs"]);
        assert!(report.modified.is_empty());
    }

    #[test]
    fn test_classify_worktree_added_is_untracked_not_added() {
        let raw = vec![entry("new.txt", FileState::Unmodified, FileState::Added)];
        let report = classify(&raw);

        assert_eq!(report.untracked, vec!["new.txt"]);
        assert!(report.added.is_empty());
    }

    #[test]
    fn test_classify_path_in_both_axes_lands_in_both_sets() {
        let raw = vec![entry("lib.rs", FileState::Modified, FileState::Modified)];
        let report = classify(&raw);

        assert_eq!(report.staged, vec!["lib.rs"]);
        assert_eq!(report.modified, vec!["lib.rs"]);
        assert_eq!(report.total(), 2);
    }

    #[test]
    fn test_classify_unmodified_paths_are_absent() {
        let raw = vec![
            entry("clean.rs", FileState::Unmodified, FileState::Unmodified),
            entry("dirty.rs", FileState::Unmodified, FileState::Modified),
        ];
        let report = classify(&raw);

        assert_eq!(report.total(), 1);
        assert_eq!(report.modified, vec!["dirty.rs"]);
    }

    #[test]
    fn test_classify_output_sorted_and_deduplicated() {
        let raw = vec![
            entry("z.rs", FileState::Unmodified, FileState::Untracked),
            entry("b.rs", FileState::Unmodified, FileState::Untracked),
            entry("b.rs", FileState::Untracked, FileState::Untracked),
            entry("a.rs", FileState::Unmodified, FileState::Added),
        ];
        let report = classify(&raw);

        assert_eq!(report.untracked, vec!["a.rs", "b.rs", "z.rs"]);
    }

    #[test]
    fn test_classify_deleted_from_both_axes_deduplicates() {
        let raw = vec![entry("gone.rs", FileState::Deleted, FileState::Deleted)];
        let report = classify(&raw);
        assert_eq!(report.deleted, vec!["gone.rs"]);
    }

    #[test]
    fn test_staged_paths_collects_every_staging_state() {
        let raw = vec![
            entry("c.rs", FileState::Deleted, FileState::Unmodified),
            entry("a.rs", FileState::Added, FileState::Modified),
            entry("b.rs", FileState::Unmodified, FileState::Modified),
            entry("d.rs", FileState::Modified, FileState::Unmodified),
        ];
        assert_eq!(staged_paths(&raw), vec!["a.rs", "c.rs", "d.rs"]);
    }

    #[test]
    fn test_from_git2_maps_index_and_worktree_flags() {
        let status = PathStatus::from_git2("f.rs", Status::INDEX_NEW | Status::WT_MODIFIED);
        assert_eq!(status.staging, FileState::Added);
        assert_eq!(status.worktree, FileState::Modified);

        let untracked = PathStatus::from_git2("n.rs", Status::WT_NEW);
        assert_eq!(untracked.staging, FileState::Unmodified);
        assert_eq!(untracked.worktree, FileState::Untracked);

        let renamed = PathStatus::from_git2("r.rs", Status::INDEX_RENAMED);
        assert_eq!(renamed.staging, FileState::Renamed);
    }

    #[test]
    fn test_from_git2_conflicted_is_modified_on_both_axes() {
        let status = PathStatus::from_git2("x.rs", Status::CONFLICTED);
        assert_eq!(status.staging, FileState::Modified);
        assert_eq!(status.worktree, FileState::Modified);
    }

    #[test]
    fn test_render_lists_sections_with_counts() {
        let raw = vec![
            entry("src/a.rs", FileState::Modified, FileState::Unmodified),
            entry("notes.md", FileState::Unmodified, FileState::Untracked),
            entry("todo.md", FileState::Unmodified, FileState::Untracked),
        ];
        let rendered = classify(&raw).render();

        assert!(rendered.contains("Staged (index) (1)\n  • src/a.rs\n"));
        assert!(rendered.contains("Untracked (2)\n  • notes.md\n  • todo.md\n"));
        assert!(!rendered.contains("Deleted"));
    }
}
