//! Foundation types for the source control system.
//!
//! Every other crate in the workspace depends on `vcs-types`.
//!
//! # Key Types
//!
//! - [`CommitRecord`] -- Immutable record of one commit (message, date, files)
//! - [`SnapshotEntry`] -- A `{file, content}` pair appended to a branch log
//! - [`validate_repo_name`] -- Repository-name rules (names map to directories)

pub mod entry;
pub mod error;
pub mod name;
pub mod record;

pub use entry::SnapshotEntry;
pub use error::{TypeError, TypeResult};
pub use name::validate_repo_name;
pub use record::{date_format, CommitRecord, DATE_FORMAT};
