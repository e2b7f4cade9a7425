//! Error types for commit log operations.

use thiserror::Error;
use vcs_types::TypeError;

/// Errors that can occur while appending to the commit log.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The record could not be constructed (empty message or file list).
    #[error(transparent)]
    InvalidRecord(#[from] TypeError),
}

/// Convenience alias for ledger results.
pub type LedgerResult<T> = Result<T, LedgerError>;
