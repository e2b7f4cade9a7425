//! Filesystem collaborator and persisted state for the source control system.
//!
//! The repository engine never touches `std::fs` directly. All working-tree
//! reads, state writes and clones go through the [`FileSystem`] trait, and
//! the on-disk layout of a repository is owned by [`RepoLayout`] and
//! [`StateStore`].
//!
//! # Persisted Layout
//!
//! ```text
//! <repo>/.vcs/history.json    ordered array of commit records
//! <repo>/.vcs/staged.json     array of staged paths
//! <repo>/.vcs/branches.json   branch name -> array of {file, content}
//! <repo>/.vcs/.vcsignore      newline-separated ignored paths
//! <repo>/.vcs/HEAD            active branch name
//! ```
//!
//! # Backends
//!
//! - [`DiskFileSystem`] -- the real filesystem (atomic rewrites, `fs2` locks)
//! - [`InMemoryFileSystem`] -- `BTreeMap`-based store for tests
//!
//! # Design Rules
//!
//! 1. Every state write replaces the whole file (read-then-fully-rewrite).
//! 2. Rewrites are atomic: a reader sees the old file or the new one.
//! 3. Locking is advisory and opt-in; without it concurrent writers are
//!    last-writer-wins.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod disk;
pub mod error;
pub mod layout;
pub mod lock;
pub mod memory;
pub mod state;
pub mod traits;

pub use disk::DiskFileSystem;
pub use error::{StoreError, StoreResult};
pub use layout::{RepoLayout, StateFile, VCS_DIR};
pub use lock::LockGuard;
pub use memory::InMemoryFileSystem;
pub use state::StateStore;
pub use traits::FileSystem;
