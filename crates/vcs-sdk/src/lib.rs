//! Repository engine for the source control system.
//!
//! [`Repository`] is the main entry point: it orchestrates the staging
//! area, branch store, commit log and ignore list of one repository and
//! persists them through the filesystem collaborator.

pub mod config;
pub mod error;
pub mod repository;

pub use config::{DiffConfig, EngineConfig, LockConfig};
pub use error::{ErrorKind, VcsError, VcsResult};
pub use repository::Repository;

// Re-export key types
pub use vcs_diff::{BranchDiff, FileDiff, NO_DIFFERENCES};
pub use vcs_merge::{MergeOutcome, MergeState};
pub use vcs_refs::DEFAULT_BRANCH;
pub use vcs_store::{DiskFileSystem, FileSystem, InMemoryFileSystem};
pub use vcs_types::{CommitRecord, SnapshotEntry};
