use thiserror::Error;

/// Errors produced by type construction and validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("commit message must not be empty")]
    EmptyMessage,

    #[error("commit must include at least one file")]
    EmptyFileList,

    #[error("invalid repository name {name:?}: {reason}")]
    InvalidRepoName { name: String, reason: String },
}

/// Convenience alias for type results.
pub type TypeResult<T> = Result<T, TypeError>;
