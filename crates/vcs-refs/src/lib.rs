//! Branch management for the source control system.
//!
//! A branch is a named, append-only log of [`SnapshotEntry`] values. The
//! same path may appear many times in one log; scanning the log front to
//! back, the last entry for a path is its current content ("latest wins").
//!
//! # Architecture
//!
//! - **Branches** start as a copy of the active branch's log at creation
//!   time and diverge afterwards (fork semantics).
//! - **`main`** always exists from repository creation onward.
//!
//! # Modules
//!
//! - [`error`] -- Error types for branch operations
//! - [`store`] -- The [`BranchStore`] map of branch name to entry log
//! - [`names`] -- Branch name validation
//!
//! [`SnapshotEntry`]: vcs_types::SnapshotEntry

pub mod error;
pub mod names;
pub mod store;

pub use error::{RefError, Result};
pub use names::validate_branch_name;
pub use store::{BranchStore, DEFAULT_BRANCH};
