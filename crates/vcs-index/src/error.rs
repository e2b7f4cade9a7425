//! Error types for the index crate.

/// Errors that can occur during staging operations.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The path is not a file in the working tree.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// The path is on the ignore list.
    #[error("path is ignored: {0}")]
    Ignored(String),

    /// Commit requested with nothing staged.
    #[error("nothing staged to commit")]
    NothingStaged,

    /// The path is empty, absolute, escapes the repository, or points
    /// into the metadata directory.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },
}

/// Convenience alias for index results.
pub type IndexResult<T> = Result<T, IndexError>;
