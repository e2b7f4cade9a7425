use std::path::Path;
use std::time::Duration;

use crate::error::StoreResult;
use crate::lock::LockGuard;

/// The filesystem collaborator consumed by the repository engine.
///
/// Implementations must satisfy these rules:
/// - `read_file` fails with `StoreError::NotFound` for a missing path.
/// - `write_file` replaces the whole file atomically and creates missing
///   parent directories.
/// - `copy_tree` fails with `StoreError::AlreadyExists` when `dst` exists
///   and leaves nothing at `dst` when it fails.
pub trait FileSystem: Send + Sync {
    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` names a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Read the full contents of a file.
    fn read_file(&self, path: &Path) -> StoreResult<Vec<u8>>;

    /// Atomically replace (or create) a file with `data`.
    fn write_file(&self, path: &Path, data: &[u8]) -> StoreResult<()>;

    /// Create a directory and all missing parents.
    fn create_dir_all(&self, path: &Path) -> StoreResult<()>;

    /// Recursively copy the tree rooted at `src` to a new location `dst`.
    fn copy_tree(&self, src: &Path, dst: &Path) -> StoreResult<()>;

    /// Take an exclusive advisory lock on `path`, polling up to `timeout`.
    ///
    /// Backends without cross-process visibility return a no-op guard.
    fn lock(&self, path: &Path, timeout: Duration) -> StoreResult<LockGuard> {
        let _ = (path, timeout);
        Ok(LockGuard::noop())
    }
}
