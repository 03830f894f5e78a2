//! Prompt construction for AI-generated commit messages.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Maximum length for sanitized diff text.
pub const MAX_DIFF_SANITIZED_LENGTH: usize = 30_000;

const PROMPT_HEADER: &str = "Generate a concise conventional commit style message summarizing changes made in this git diff.";

static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("valid ANSI regex"));

/// Build the LLM prompt for generating a commit message from a diff.
pub fn build_commit_prompt(diff: &str) -> String {
    let (sanitized, truncated) = sanitize_diff(diff, MAX_DIFF_SANITIZED_LENGTH);

    let truncation_note = if truncated {
        "\n\nNote: The diff was truncated due to size. Focus on the visible changes."
    } else {
        ""
    };

    format!(
        "{PROMPT_HEADER}\nReply with the commit message only: an imperative subject line, \
         optionally followed by a blank line and 1-3 bullet lines.\n{sanitized}{truncation_note}"
    )
}

/// Sanitize diff text for inclusion in an LLM prompt.
///
/// Removes control characters (except newlines and tabs) and ANSI escape
/// sequences, then truncates on a char boundary. Returns whether the text was
/// truncated.
pub fn sanitize_diff(text: &str, max_len: usize) -> (String, bool) {
    let without_ansi = ANSI_ESCAPE.replace_all(text, "");
    let mut result: String = without_ansi
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    if result.len() <= max_len {
        return (result, false);
    }

    let mut end = max_len;
    while end > 0 && !result.is_char_boundary(end) {
        end -= 1;
    }
    result.truncate(end);
    (result, true)
}
