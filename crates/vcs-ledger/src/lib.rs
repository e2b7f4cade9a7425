//! Commit log for the source control system.
//!
//! The [`CommitLog`] is the append-only history of a repository. Records are
//! never edited or removed, and their timestamps never decrease from one
//! record to the next.

pub mod error;
pub mod log;

pub use error::{LedgerError, LedgerResult};
pub use log::CommitLog;
