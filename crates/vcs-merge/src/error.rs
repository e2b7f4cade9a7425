//! Error types for merge operations.

use thiserror::Error;

use crate::merge::MergeState;

/// Errors that can occur while merging branches.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    /// A branch taking part in the merge does not exist.
    #[error(transparent)]
    Ref(#[from] vcs_refs::RefError),

    /// A step was requested in a state that does not allow it.
    #[error("invalid merge transition from {from:?}: {step}")]
    InvalidTransition { from: MergeState, step: &'static str },
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
