use std::path::PathBuf;

/// Errors from filesystem and state operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested file or directory does not exist.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The target of a create or copy already exists.
    #[error("already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// A persisted state file could not be decoded.
    #[error("corrupt state file {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    /// Serialization failure while encoding state.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The repository lock could not be acquired in time.
    #[error("timed out waiting for lock {}", .0.display())]
    LockTimeout(PathBuf),

    /// I/O error from the underlying filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
