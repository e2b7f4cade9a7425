//! Read-then-fully-rewrite access to a repository's persisted state.
//!
//! [`StateStore`] knows where each state file lives and how it is encoded
//! (JSON or plain lines). It does not know what the structures mean; the
//! index, refs and ledger crates own those types and pass them through
//! here as `Serialize`/`DeserializeOwned` values.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::layout::{RepoLayout, StateFile};
use crate::lock::LockGuard;
use crate::traits::FileSystem;

/// Persisted state of one repository.
#[derive(Clone)]
pub struct StateStore {
    fs: Arc<dyn FileSystem>,
    layout: RepoLayout,
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("layout", &self.layout)
            .finish()
    }
}

impl StateStore {
    pub fn new(fs: Arc<dyn FileSystem>, layout: RepoLayout) -> Self {
        Self { fs, layout }
    }

    pub fn layout(&self) -> &RepoLayout {
        &self.layout
    }

    pub fn fs(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// Whether the repository's `.vcs` directory exists.
    pub fn is_initialized(&self) -> bool {
        self.fs.exists(&self.layout.vcs_dir())
    }

    /// Whether a particular state file exists.
    pub fn has(&self, file: StateFile) -> bool {
        self.fs.exists(&self.layout.state_file(file))
    }

    /// Load and decode a JSON state file.
    pub fn read_json<T: DeserializeOwned>(&self, file: StateFile) -> StoreResult<T> {
        let path = self.layout.state_file(file);
        let bytes = self.fs.read_file(&path)?;
        let value = serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        debug!(file = file.file_name(), len = bytes.len(), "state loaded");
        Ok(value)
    }

    /// Encode and fully rewrite a JSON state file.
    pub fn write_json<T: Serialize>(&self, file: StateFile, value: &T) -> StoreResult<()> {
        let bytes = Self::encode_json(value)?;
        self.fs.write_file(&self.layout.state_file(file), &bytes)?;
        debug!(file = file.file_name(), len = bytes.len(), "state written");
        Ok(())
    }

    /// Encode a value the way JSON state files are written.
    pub fn encode_json<T: Serialize>(value: &T) -> StoreResult<Vec<u8>> {
        serde_json::to_vec_pretty(value).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Rewrite several state files as one unit.
    ///
    /// Files are written in the given order. If a write fails, every file
    /// already rewritten gets its previous content back before the error
    /// is returned.
    pub fn write_all(&self, files: &[(StateFile, Vec<u8>)]) -> StoreResult<()> {
        let mut previous = Vec::with_capacity(files.len());
        for (file, _) in files {
            match self.fs.read_file(&self.layout.state_file(*file)) {
                Ok(bytes) => previous.push(Some(bytes)),
                Err(StoreError::NotFound(_)) => previous.push(None),
                Err(e) => return Err(e),
            }
        }

        for (done, (file, bytes)) in files.iter().enumerate() {
            if let Err(err) = self.fs.write_file(&self.layout.state_file(*file), bytes) {
                warn!(file = file.file_name(), error = %err, "state write failed; restoring");
                self.restore(&files[..done], &previous[..done]);
                return Err(err);
            }
            debug!(file = file.file_name(), len = bytes.len(), "state written");
        }
        Ok(())
    }

    fn restore(&self, written: &[(StateFile, Vec<u8>)], previous: &[Option<Vec<u8>>]) {
        for ((file, _), old) in written.iter().zip(previous).rev() {
            let Some(old) = old else {
                warn!(file = file.file_name(), "no previous content to restore");
                continue;
            };
            if let Err(e) = self.fs.write_file(&self.layout.state_file(*file), old) {
                warn!(file = file.file_name(), error = %e, "state file could not be restored");
            }
        }
    }

    /// Load a plain-text state file.
    pub fn read_text(&self, file: StateFile) -> StoreResult<String> {
        let path = self.layout.state_file(file);
        let bytes = self.fs.read_file(&path)?;
        String::from_utf8(bytes).map_err(|e| StoreError::Corrupt {
            path,
            reason: e.to_string(),
        })
    }

    /// Fully rewrite a plain-text state file.
    pub fn write_text(&self, file: StateFile, text: &str) -> StoreResult<()> {
        self.fs
            .write_file(&self.layout.state_file(file), text.as_bytes())
    }

    /// Create the `.vcs` directory.
    pub fn create_vcs_dir(&self) -> StoreResult<()> {
        self.fs.create_dir_all(&self.layout.vcs_dir())
    }

    /// Take the repository lock for one read-modify-write cycle.
    pub fn lock(&self, timeout: Duration) -> StoreResult<LockGuard> {
        self.fs.lock(&self.layout.lock_file(), timeout)
    }
}
