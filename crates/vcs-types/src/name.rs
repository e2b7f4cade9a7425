//! Repository name validation.
//!
//! A repository name maps directly to a directory under the configured
//! root, so it must be a single plain path component.

use crate::error::{TypeError, TypeResult};

/// Validate a repository name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use vcs_types::validate_repo_name;
///
/// assert!(validate_repo_name("proj").is_ok());
/// assert!(validate_repo_name("my-repo_2").is_ok());
/// assert!(validate_repo_name("").is_err());
/// assert!(validate_repo_name("a/b").is_err());
/// assert!(validate_repo_name("..").is_err());
/// ```
pub fn validate_repo_name(name: &str) -> TypeResult<()> {
    let reject = |reason: &str| {
        Err(TypeError::InvalidRepoName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.is_empty() {
        return reject("must not be empty");
    }
    if name == "." || name == ".." {
        return reject("must not be a relative directory marker");
    }
    if name.contains('/') || name.contains('\\') {
        return reject("must not contain path separators");
    }
    if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return reject("must not contain whitespace or control characters");
    }
    if name == ".vcs" {
        return reject("reserved name");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_reserved_and_separators() {
        assert!(validate_repo_name(".vcs").is_err());
        assert!(validate_repo_name("a\\b").is_err());
        assert!(validate_repo_name("has space").is_err());
        assert!(validate_repo_name(".").is_err());
    }

    proptest! {
        #[test]
        fn plain_names_are_valid(name in "[a-zA-Z0-9_-]{1,32}") {
            prop_assert!(validate_repo_name(&name).is_ok());
        }

        #[test]
        fn names_with_slashes_are_invalid(
            prefix in "[a-zA-Z0-9_-]{1,8}",
            suffix in "[a-zA-Z0-9_-]{1,8}"
        ) {
            let name = format!("{prefix}/{suffix}");
            prop_assert!(validate_repo_name(&name).is_err());
        }
    }
}
