//! Staged diff collection for a list of paths.

use tracing::warn;

use crate::error::GitError;
use crate::git::backend::VcsBackend;

/// Collect the staged diff for `paths`, concatenated in input order.
///
/// The first path that fails to diff aborts the whole collection; no partial
/// diff is returned.
pub fn collect_diff<B: VcsBackend + ?Sized>(
    backend: &B,
    paths: &[String],
) -> Result<String, GitError> {
    let mut text = String::new();
    for path in paths {
        text.push_str(&backend.diff_path(path)?);
    }
    Ok(text)
}

/// A path that [`collect_diff_lenient`] could not diff.
#[derive(Debug)]
pub struct SkippedPath {
    pub path: String,
    pub error: GitError,
}

/// Diff text plus the paths left out of it.
#[derive(Debug, Default)]
pub struct DiffCollection {
    pub text: String,
    pub skipped: Vec<SkippedPath>,
}

impl DiffCollection {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Collect the staged diff for `paths`, skipping paths that fail.
///
/// Unlike [`collect_diff`], a per-path failure is recorded in
/// [`DiffCollection::skipped`] and the remaining paths are still diffed.
pub fn collect_diff_lenient<B: VcsBackend + ?Sized>(
    backend: &B,
    paths: &[String],
) -> DiffCollection {
    let mut collection = DiffCollection::default();
    for path in paths {
        match backend.diff_path(path) {
            Ok(text) => collection.text.push_str(&text),
            Err(error) => {
                warn!("Skipping diff for {}: {}", path, error);
                collection.skipped.push(SkippedPath {
                    path: path.clone(),
                    error,
                });
            }
        }
    }
    collection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::backend::MockVcsBackend;
    use mockall::Sequence;
    use mockall::predicate::eq;

    fn diff_failed(path: &str) -> GitError {
        GitError::DiffFailed {
            path: path.to_string(),
            source: git2::Error::from_str("object not found"),
        }
    }

    #[test]
    fn test_collect_diff_empty_input_is_empty_text() {
        let mut mock = MockVcsBackend::new();
        mock.expect_diff_path().times(0);

        assert_eq!(collect_diff(&mock, &[]).unwrap(), "");
    }

    #[test]
    fn test_collect_diff_concatenates_in_input_order() {
        let mut mock = MockVcsBackend::new();
        let mut seq = Sequence::new();
        mock.expect_diff_path()
            .with(eq("b.rs"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("+b\n".to_string()));
        mock.expect_diff_path()
            .with(eq("a.rs"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok("+a\n".to_string()));

        let paths = vec!["b.rs".to_string(), "a.rs".to_string()];
        assert_eq!(collect_diff(&mock, &paths).unwrap(), "+b\n+a\n");
    }

    #[test]
    fn test_collect_diff_aborts_on_first_failure() {
        let mut mock = MockVcsBackend::new();
        mock.expect_diff_path()
            .with(eq("ok.rs"))
            .times(1)
            .returning(|_| Ok("+ok\n".to_string()));
        mock.expect_diff_path()
            .with(eq("bad.rs"))
            .times(1)
            .returning(|p| Err(diff_failed(p)));
        mock.expect_diff_path().with(eq("never.rs")).times(0);

        let paths = vec![
            "ok.rs".to_string(),
            "bad.rs".to_string(),
            "never.rs".to_string(),
        ];
        let result = collect_diff(&mock, &paths);

        match result {
            Err(GitError::DiffFailed { path, .. }) => assert_eq!(path, "bad.rs"),
            other => panic!("Expected DiffFailed, got: {:?}", other),
        }
    }

    #[test]
    fn test_collect_diff_lenient_keeps_good_paths() {
        let mut mock = MockVcsBackend::new();
        mock.expect_diff_path()
            .with(eq("ok.rs"))
            .returning(|_| Ok("+ok\n".to_string()));
        mock.expect_diff_path()
            .with(eq("bad.rs"))
            .returning(|p| Err(diff_failed(p)));
        mock.expect_diff_path()
            .with(eq("also_ok.rs"))
            .returning(|_| Ok("+also\n".to_string()));

        let paths = vec![
            "ok.rs".to_string(),
            "bad.rs".to_string(),
            "also_ok.rs".to_string(),
        ];
        let collection = collect_diff_lenient(&mock, &paths);

        assert_eq!(collection.text, "+ok\n+also\n");
        assert!(!collection.is_complete());
        assert_eq!(collection.skipped.len(), 1);
        assert_eq!(collection.skipped[0].path, "bad.rs");
    }
}
