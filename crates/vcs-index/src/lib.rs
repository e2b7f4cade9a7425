//! Staging area and ignore list for the source control system.
//!
//! Tracks which working-tree paths are queued for the next commit and which
//! paths may never be queued.
//!
//! # Key Types
//!
//! - [`StagingArea`] -- Ordered, duplicate-free set of staged paths
//! - [`IgnoreList`] -- Set of paths excluded from staging
//! - [`normalize_path`] -- Canonical form of a working-tree relative path

pub mod error;
pub mod ignore;
pub mod path;
pub mod staging;

pub use error::{IndexError, IndexResult};
pub use ignore::IgnoreList;
pub use path::normalize_path;
pub use staging::StagingArea;
