//! Deterministic, network-free commit message fallback.

/// Number of extensions named in the summary.
const MAX_EXTENSIONS: usize = 3;

/// Message used when nothing is staged.
pub const EMPTY_COMMIT_MESSAGE: &str = "chore: empty commit";

/// Build a commit message from the staged paths alone.
///
/// Produces `update N paths (2 rs files, 1 toml file)`: the top extensions by
/// frequency, ties broken by first appearance. Paths without an extension
/// still count toward `N`.
pub fn heuristic_message(paths: &[String]) -> String {
    if paths.is_empty() {
        return EMPTY_COMMIT_MESSAGE.to_string();
    }

    // (extension, count) in first-seen order
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for ext in paths.iter().filter_map(|p| extension(p)) {
        match tally.iter_mut().find(|(seen, _)| *seen == ext) {
            Some((_, count)) => *count += 1,
            None => tally.push((ext, 1)),
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    tally.sort_by(|a, b| b.1.cmp(&a.1));

    let parts: Vec<String> = tally
        .iter()
        .take(MAX_EXTENSIONS)
        .map(|(ext, count)| {
            let noun = if *count == 1 { "file" } else { "files" };
            format!("{} {} {}", count, ext, noun)
        })
        .collect();

    if parts.is_empty() {
        format!("update {} paths", paths.len())
    } else {
        format!("update {} paths ({})", paths.len(), parts.join(", "))
    }
}

/// Text after the last `.`, unless the dot is the final character.
fn extension(path: &str) -> Option<&str> {
    let dot = path.rfind('.')?;
    let ext = &path[dot + 1..];
    if ext.is_empty() { None } else { Some(ext) }
}
