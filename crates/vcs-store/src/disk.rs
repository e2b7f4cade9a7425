//! The real filesystem backend.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{StoreError, StoreResult};
use crate::lock::LockGuard;
use crate::traits::FileSystem;

/// [`FileSystem`] backed by `std::fs`.
///
/// Writes go through a temp file in the target directory followed by a
/// rename, so a crash mid-write never leaves a torn state file.
#[derive(Clone, Debug, Default)]
pub struct DiskFileSystem;

impl DiskFileSystem {
    pub fn new() -> Self {
        Self
    }
}

fn map_not_found(err: io::Error, path: &Path) -> StoreError {
    if err.kind() == io::ErrorKind::NotFound {
        StoreError::NotFound(path.to_path_buf())
    } else {
        StoreError::Io(err)
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

impl FileSystem for DiskFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_file(&self, path: &Path) -> StoreResult<Vec<u8>> {
        fs::read(path).map_err(|e| map_not_found(e, path))
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> StoreResult<()> {
        let dir = parent_dir(path);
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_data()?;
        tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %path.display(), len = data.len(), "file rewritten");
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> StoreResult<()> {
        fs::create_dir_all(path)?;
        Ok(())
    }

    fn copy_tree(&self, src: &Path, dst: &Path) -> StoreResult<()> {
        if !src.is_dir() {
            return Err(StoreError::NotFound(src.to_path_buf()));
        }
        if dst.exists() || dst.is_symlink() {
            return Err(StoreError::AlreadyExists(dst.to_path_buf()));
        }

        // Assembled in a sibling temp dir, then renamed into place.
        let parent = parent_dir(dst);
        fs::create_dir_all(parent)?;
        let staging = tempfile::Builder::new()
            .prefix(".vcs-copy-")
            .tempdir_in(parent)?;
        let copied = copy_entries(src, staging.path())?;
        fs::rename(staging.path(), dst)?;

        debug!(src = %src.display(), dst = %dst.display(), files = copied, "tree copied");
        Ok(())
    }

    fn lock(&self, path: &Path, timeout: Duration) -> StoreResult<LockGuard> {
        LockGuard::acquire(path, timeout)
    }
}

/// Copy everything below `src` into the existing directory `dst`.
/// Symlinks are recreated as links, never followed.
fn copy_entries(src: &Path, dst: &Path) -> StoreResult<usize> {
    let mut copied = 0usize;
    for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        let file_type = entry.file_type();
        if file_type.is_symlink() {
            copy_link(entry.path(), &target)?;
        } else if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(unix)]
fn copy_link(link: &Path, target: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(link)?, target)
}

#[cfg(not(unix))]
fn copy_link(link: &Path, _target: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot copy symlink {}", link.display()),
    ))
}
