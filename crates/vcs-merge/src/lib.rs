//! Merge engine for the source control system.
//!
//! A merge appends every entry of the source branch's log onto the target
//! branch's log, in order. There is no conflict detection and no path
//! deduplication: because the latest entry for a path wins, any path the
//! source touched ends up with the source's content on the target.
//!
//! The operation runs through a small state machine
//! (`Idle -> Merging -> Merged`, with `Failed` on a missing branch) so the
//! lifecycle is explicit and observable in tests.

pub mod error;
pub mod merge;

pub use error::{MergeError, MergeResult};
pub use merge::{merge_branch, MergeMachine, MergeOutcome, MergeState};
