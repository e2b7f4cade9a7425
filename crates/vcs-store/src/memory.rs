//! In-memory filesystem for testing and ephemeral use.
//!
//! [`InMemoryFileSystem`] keeps files in a `BTreeMap` behind a `RwLock`.
//! Directories are tracked explicitly so `exists` and `copy_tree` behave
//! like the disk backend. Data is lost when the value is dropped.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::FileSystem;

#[derive(Debug, Default)]
struct Tree {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

impl Tree {
    fn add_parents(&mut self, path: &Path) {
        let mut current = path.parent();
        while let Some(dir) = current {
            if dir.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(dir.to_path_buf());
            current = dir.parent();
        }
    }
}

/// An in-memory implementation of [`FileSystem`].
#[derive(Debug, Default)]
pub struct InMemoryFileSystem {
    tree: RwLock<Tree>,
}

impl InMemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a file, returning `true` if it existed.
    pub fn remove_file(&self, path: &Path) -> StoreResult<bool> {
        let mut tree = self.write_tree()?;
        Ok(tree.files.remove(path).is_some())
    }

    fn read_tree(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Tree>> {
        self.tree
            .read()
            .map_err(|e| StoreError::Serialization(format!("lock poisoned: {e}")))
    }

    fn write_tree(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Tree>> {
        self.tree
            .write()
            .map_err(|e| StoreError::Serialization(format!("lock poisoned: {e}")))
    }
}

impl FileSystem for InMemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.tree
            .read()
            .map(|t| t.files.contains_key(path) || t.dirs.contains(path))
            .unwrap_or(false)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.tree
            .read()
            .map(|t| t.files.contains_key(path))
            .unwrap_or(false)
    }

    fn read_file(&self, path: &Path) -> StoreResult<Vec<u8>> {
        self.read_tree()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_path_buf()))
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> StoreResult<()> {
        let mut tree = self.write_tree()?;
        tree.add_parents(path);
        tree.files.insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> StoreResult<()> {
        let mut tree = self.write_tree()?;
        tree.add_parents(path);
        tree.dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn copy_tree(&self, src: &Path, dst: &Path) -> StoreResult<()> {
        let mut tree = self.write_tree()?;
        if !tree.dirs.contains(src) {
            return Err(StoreError::NotFound(src.to_path_buf()));
        }
        if tree.dirs.contains(dst) || tree.files.contains_key(dst) {
            return Err(StoreError::AlreadyExists(dst.to_path_buf()));
        }

        let dirs: Vec<PathBuf> = tree
            .dirs
            .iter()
            .filter_map(|d| d.strip_prefix(src).ok().map(|rel| dst.join(rel)))
            .collect();
        let files: Vec<(PathBuf, Vec<u8>)> = tree
            .files
            .iter()
            .filter_map(|(p, data)| {
                p.strip_prefix(src)
                    .ok()
                    .map(|rel| (dst.join(rel), data.clone()))
            })
            .collect();

        tree.add_parents(dst);
        tree.dirs.extend(dirs);
        tree.files.extend(files);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read() {
        let fs = InMemoryFileSystem::new();
        fs.write_file(Path::new("repo/a.txt"), b"hello").unwrap();
        assert_eq!(fs.read_file(Path::new("repo/a.txt")).unwrap(), b"hello");
        assert!(fs.exists(Path::new("repo")));
        assert!(fs.is_file(Path::new("repo/a.txt")));
        assert!(!fs.is_file(Path::new("repo")));
    }

    #[test]
    fn missing_file_is_not_found() {
        let fs = InMemoryFileSystem::new();
        let err = fs.read_file(Path::new("nope")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn copy_tree_copies_nested_content() {
        let fs = InMemoryFileSystem::new();
        fs.write_file(Path::new("src/a.txt"), b"a").unwrap();
        fs.write_file(Path::new("src/.vcs/staged.json"), b"[]").unwrap();
        fs.write_file(Path::new("srcx/other"), b"x").unwrap();

        fs.copy_tree(Path::new("src"), Path::new("dst")).unwrap();
        assert_eq!(fs.read_file(Path::new("dst/a.txt")).unwrap(), b"a");
        assert_eq!(fs.read_file(Path::new("dst/.vcs/staged.json")).unwrap(), b"[]");
        assert!(!fs.exists(Path::new("dst/other")));
        assert_eq!(fs.read_file(Path::new("src/a.txt")).unwrap(), b"a");
    }

    #[test]
    fn copy_tree_refuses_existing_target() {
        let fs = InMemoryFileSystem::new();
        fs.create_dir_all(Path::new("src")).unwrap();
        fs.create_dir_all(Path::new("dst")).unwrap();
        let err = fs.copy_tree(Path::new("src"), Path::new("dst")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[test]
    fn remove_file() {
        let fs = InMemoryFileSystem::new();
        fs.write_file(Path::new("a"), b"1").unwrap();
        assert!(fs.remove_file(Path::new("a")).unwrap());
        assert!(!fs.remove_file(Path::new("a")).unwrap());
        assert!(!fs.exists(Path::new("a")));
    }
}
