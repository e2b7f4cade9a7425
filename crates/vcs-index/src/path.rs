//! Working-tree path normalization.

use std::path::{Component, Path};

use vcs_store::VCS_DIR;

use crate::error::{IndexError, IndexResult};

/// Normalize a working-tree relative path to `/`-separated components.
///
/// `./a/b.txt` and `a//b.txt` both become `a/b.txt`. Empty paths, absolute
/// paths, `..` components and anything under `.vcs` are rejected.
pub fn normalize_path(path: &str) -> IndexResult<String> {
    let invalid = |reason: &str| IndexError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty path"));
    }

    let mut parts: Vec<&str> = Vec::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| invalid("not valid UTF-8"))?;
                parts.push(part);
            }
            Component::CurDir => {}
            Component::ParentDir => return Err(invalid("must not contain '..'")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("must be relative to the repository"))
            }
        }
    }

    match parts.first() {
        None => Err(invalid("empty path")),
        Some(first) if *first == VCS_DIR => Err(invalid("metadata directory is not trackable")),
        Some(_) => Ok(parts.join("/")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_current_dir_and_slashes() {
        assert_eq!(normalize_path("./a.txt").unwrap(), "a.txt");
        assert_eq!(normalize_path("dir//b.txt").unwrap(), "dir/b.txt");
        assert_eq!(normalize_path(" c.txt ").unwrap(), "c.txt");
    }

    #[test]
    fn rejects_escapes_and_metadata() {
        assert!(normalize_path("").is_err());
        assert!(normalize_path(".").is_err());
        assert!(normalize_path("../outside").is_err());
        assert!(normalize_path("/etc/passwd").is_err());
        assert!(normalize_path(".vcs/history.json").is_err());
    }
}
