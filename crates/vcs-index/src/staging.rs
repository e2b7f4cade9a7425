//! The staging area: paths queued for the next commit.
//!
//! The [`StagingArea`] is an ordered set. Insertion order is preserved so
//! the commit record lists files in the order they were added, and adding a
//! path twice is a no-op. It is drained as a whole by a successful commit,
//! never partially.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vcs_store::FileSystem;

use crate::error::{IndexError, IndexResult};
use crate::ignore::IgnoreList;
use crate::path::normalize_path;

/// Ordered, duplicate-free set of staged paths.
///
/// Serialized as a plain JSON array of strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StagingArea {
    paths: Vec<String>,
}

impl StagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Staged paths in insertion order.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Validate `path` against the ignore list and the working tree rooted
    /// at `work_dir`, then stage it.
    ///
    /// The ignore list is consulted first, so an ignored path is reported
    /// as ignored whether or not it exists. Returns the normalized path and
    /// whether it was newly staged.
    pub fn stage(
        &mut self,
        path: &str,
        ignore: &IgnoreList,
        fs: &dyn FileSystem,
        work_dir: &Path,
    ) -> IndexResult<(String, bool)> {
        let normalized = normalize_path(path)?;

        if ignore.contains(&normalized) {
            return Err(IndexError::Ignored(normalized));
        }
        if !fs.is_file(&work_dir.join(&normalized)) {
            return Err(IndexError::FileNotFound(normalized));
        }

        let added = self.insert(normalized.clone());
        debug!(path = %normalized, added, "path staged");
        Ok((normalized, added))
    }

    /// Insert an already-validated path. Returns `false` if present.
    pub fn insert(&mut self, path: String) -> bool {
        if self.contains(&path) {
            return false;
        }
        self.paths.push(path);
        true
    }

    /// Unstage a path. Returns `false` if it was not staged.
    pub fn remove(&mut self, path: &str) -> bool {
        let before = self.paths.len();
        self.paths.retain(|p| p != path);
        self.paths.len() != before
    }

    /// Take every staged path, leaving the area empty.
    ///
    /// Fails with [`IndexError::NothingStaged`] when there is nothing to
    /// take; the area is unchanged in that case.
    pub fn drain(&mut self) -> IndexResult<Vec<String>> {
        if self.paths.is_empty() {
            return Err(IndexError::NothingStaged);
        }
        Ok(std::mem::take(&mut self.paths))
    }
}
