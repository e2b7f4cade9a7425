//! Branch name validation following git-style conventions.
//!
//! Valid branch names:
//! - Must be non-empty
//! - Must not contain whitespace, control characters, `~`, `^`, `:`, `?`,
//!   `*`, `[`, `\`
//! - Must not contain `..` or `//`
//! - Must not start or end with `.` or `/`
//! - Must not end with `.lock`
//! - No `/`-separated component may start with `.`

use crate::error::{RefError, Result};

/// Characters that are forbidden anywhere in a branch name.
const FORBIDDEN_CHARS: &[char] = &['~', '^', ':', '?', '*', '[', '\\'];

/// Forbidden substrings and the reason reported for each.
const FORBIDDEN_SEQUENCES: &[(&str, &str)] = &[
    ("..", "must not contain '..'"),
    ("//", "must not contain consecutive slashes '//'"),
];

/// Validate a branch name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use vcs_refs::names::validate_branch_name;
///
/// assert!(validate_branch_name("main").is_ok());
/// assert!(validate_branch_name("feature/login").is_ok());
/// assert!(validate_branch_name("").is_err());
/// assert!(validate_branch_name("bad..name").is_err());
/// ```
pub fn validate_branch_name(name: &str) -> Result<()> {
    let reject = |reason: String| {
        Err(RefError::InvalidBranchName {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return reject("branch name must not be empty".into());
    }

    if let Some(ch) = name
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_CHARS.contains(c))
    {
        return reject(format!("contains forbidden character: {ch:?}"));
    }

    for (sequence, reason) in FORBIDDEN_SEQUENCES {
        if name.contains(sequence) {
            return reject((*reason).into());
        }
    }

    if name.ends_with('.') || name.ends_with('/') || name.starts_with('/') {
        return reject("must not start with '/' or end with '.' or '/'".into());
    }

    if name.ends_with(".lock") {
        return reject("must not end with '.lock'".into());
    }

    if let Some(component) = name.split('/').find(|c| c.starts_with('.')) {
        return reject(format!("component must not start with '.': {component:?}"));
    }

    Ok(())
}
