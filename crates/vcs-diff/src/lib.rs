//! Diff engine for the source control system.
//!
//! Compares branch snapshots and produces deterministic, unified-diff style
//! reports.
//!
//! # Key Types
//!
//! - [`TextDiff`] / [`DiffHunk`] / [`DiffLine`] -- Line-level content diff
//! - [`BranchDiff`] / [`FileDiff`] -- Added, removed and modified paths
//!   between two branch snapshots

pub mod branch_diff;
pub mod text_diff;

pub use branch_diff::{diff_branches, BranchDiff, FileDiff, NO_DIFFERENCES};
pub use text_diff::{diff_text, DiffHunk, DiffLine, TextDiff, DEFAULT_CONTEXT};
