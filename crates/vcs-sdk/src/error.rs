use thiserror::Error;
use vcs_index::IndexError;
use vcs_ledger::LedgerError;
use vcs_merge::MergeError;
use vcs_refs::RefError;
use vcs_store::StoreError;
use vcs_types::TypeError;

/// Typed failure of a repository operation.
///
/// A failed operation leaves the persisted state as it was before the call.
#[derive(Debug, Error)]
pub enum VcsError {
    #[error("repository already exists: {0}")]
    RepositoryExists(String),

    #[error("repository not found: {0}")]
    RepositoryNotFound(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("branch already exists: {0}")]
    BranchExists(String),

    #[error("branch not found: {0}")]
    BranchNotFound(String),

    #[error("path is ignored: {0}")]
    IgnoredPath(String),

    #[error("nothing staged to commit")]
    NothingStaged,

    #[error("commit message must not be empty")]
    EmptyMessage,

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse error categories callers can branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    AlreadyExists,
    NotFound,
    IgnoredPath,
    NothingStaged,
    Invalid,
    Storage,
    Internal,
}

impl VcsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VcsError::RepositoryExists(_) | VcsError::BranchExists(_) => ErrorKind::AlreadyExists,
            VcsError::RepositoryNotFound(_)
            | VcsError::FileNotFound(_)
            | VcsError::BranchNotFound(_) => ErrorKind::NotFound,
            VcsError::IgnoredPath(_) => ErrorKind::IgnoredPath,
            VcsError::NothingStaged => ErrorKind::NothingStaged,
            VcsError::EmptyMessage | VcsError::InvalidName(_) | VcsError::Config(_) => {
                ErrorKind::Invalid
            }
            VcsError::Store(_) => ErrorKind::Storage,
            VcsError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<IndexError> for VcsError {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::FileNotFound(path) => VcsError::FileNotFound(path),
            IndexError::Ignored(path) => VcsError::IgnoredPath(path),
            IndexError::NothingStaged => VcsError::NothingStaged,
            IndexError::InvalidPath { path, reason } => {
                VcsError::InvalidName(format!("{path:?}: {reason}"))
            }
        }
    }
}

impl From<RefError> for VcsError {
    fn from(err: RefError) -> Self {
        match err {
            RefError::NotFound { name } => VcsError::BranchNotFound(name),
            RefError::AlreadyExists { name } => VcsError::BranchExists(name),
            RefError::InvalidBranchName { name, reason } => {
                VcsError::InvalidName(format!("{name:?}: {reason}"))
            }
        }
    }
}

impl From<TypeError> for VcsError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::EmptyMessage => VcsError::EmptyMessage,
            TypeError::EmptyFileList => VcsError::NothingStaged,
            TypeError::InvalidRepoName { name, reason } => {
                VcsError::InvalidName(format!("{name:?}: {reason}"))
            }
        }
    }
}

impl From<LedgerError> for VcsError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidRecord(e) => e.into(),
        }
    }
}

impl From<MergeError> for VcsError {
    fn from(err: MergeError) -> Self {
        match err {
            MergeError::Ref(e) => e.into(),
            other @ MergeError::InvalidTransition { .. } => VcsError::Internal(other.to_string()),
        }
    }
}

pub type VcsResult<T> = Result<T, VcsError>;
