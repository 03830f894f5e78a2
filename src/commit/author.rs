//! Commit author resolution.
//!
//! Precedence, evaluated once per plan:
//! 1. an explicit `Name <email>` override,
//! 2. `GIT_AUTHOR_NAME` / `GIT_AUTHOR_EMAIL`,
//! 3. placeholder defaults.

use std::env;
use std::fmt;

use tracing::debug;

/// Environment variable consulted for the author name.
pub const AUTHOR_NAME_ENV_VAR: &str = "GIT_AUTHOR_NAME";

/// Environment variable consulted for the author email.
pub const AUTHOR_EMAIL_ENV_VAR: &str = "GIT_AUTHOR_EMAIL";

pub const DEFAULT_AUTHOR_NAME: &str = "bgit user";
pub const DEFAULT_AUTHOR_EMAIL: &str = "user@example.com";

/// Identity used as both author and committer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Why an override string was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorParseError {
    MissingOpenBracket,
    MissingCloseBracket,
    UnbalancedBrackets,
    EmptyName,
    EmptyEmail,
}

impl fmt::Display for AuthorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorParseError::MissingOpenBracket => write!(f, "missing '<'"),
            AuthorParseError::MissingCloseBracket => write!(f, "must end with '>'"),
            AuthorParseError::UnbalancedBrackets => write!(f, "unbalanced angle brackets"),
            AuthorParseError::EmptyName => write!(f, "empty name"),
            AuthorParseError::EmptyEmail => write!(f, "empty email"),
        }
    }
}

/// Parse `Name <email>`.
///
/// The trimmed input must contain exactly one `<` and end with the only `>`.
/// Name and email are trimmed and must both be non-empty.
pub fn parse_author(input: &str) -> Result<Author, AuthorParseError> {
    let input = input.trim();

    let open = input.find('<').ok_or(AuthorParseError::MissingOpenBracket)?;
    let inner = input
        .strip_suffix('>')
        .ok_or(AuthorParseError::MissingCloseBracket)?;

    let (name, email) = (&inner[..open], &inner[open + 1..]);
    if email.contains('<') || email.contains('>') || name.contains('>') {
        return Err(AuthorParseError::UnbalancedBrackets);
    }

    let name = name.trim();
    let email = email.trim();
    if name.is_empty() {
        return Err(AuthorParseError::EmptyName);
    }
    if email.is_empty() {
        return Err(AuthorParseError::EmptyEmail);
    }

    Ok(Author {
        name: name.to_string(),
        email: email.to_string(),
    })
}

/// Resolve the commit author from an optional override, then the
/// environment, then placeholders.
///
/// A malformed override is ignored rather than rejected.
pub fn resolve_author(override_str: Option<&str>) -> Author {
    if let Some(raw) = override_str.filter(|s| !s.trim().is_empty()) {
        match parse_author(raw) {
            Ok(author) => return author,
            Err(e) => debug!("Ignoring author override '{}': {}", raw, e),
        }
    }

    Author {
        name: env_or(AUTHOR_NAME_ENV_VAR, DEFAULT_AUTHOR_NAME),
        email: env_or(AUTHOR_EMAIL_ENV_VAR, DEFAULT_AUTHOR_EMAIL),
    }
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}
