//! Advisory repository locks.
//!
//! Uses `flock(2)`-style locks via the `fs2` crate. The OS releases the
//! lock when the process dies, so no stale-lock detection is needed.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::time::{Duration, Instant};

use fs2::FileExt;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// An exclusive lock held for the lifetime of the value.
#[derive(Debug)]
pub struct LockGuard {
    file: Option<File>,
}

impl LockGuard {
    /// A guard that holds nothing.
    pub fn noop() -> Self {
        Self { file: None }
    }

    /// Acquire an exclusive lock on the file at `path`.
    ///
    /// Polls every 10ms until the lock is taken or `timeout` expires.
    pub fn acquire(path: &Path, timeout: Duration) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;

        let start = Instant::now();
        let poll_interval = Duration::from_millis(10);

        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    debug!(path = %path.display(), "lock acquired");
                    return Ok(Self { file: Some(file) });
                }
                Err(_) if start.elapsed() >= timeout => {
                    return Err(StoreError::LockTimeout(path.to_path_buf()));
                }
                Err(_) => std::thread::sleep(poll_interval),
            }
        }
    }

    /// Returns `true` if this guard holds an OS lock.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = FileExt::unlock(&file);
        }
    }
}
