//! Log-concatenation merge and its state machine.

use tracing::{debug, info};
use vcs_refs::{BranchStore, RefError};

use crate::error::{MergeError, MergeResult};

/// Lifecycle of one merge.
///
/// `Idle -> Merging` once the source branch is confirmed to exist,
/// `Merging -> Merged` after the entries are appended. `Failed` is entered
/// when a branch is missing. There is no conflict state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeState {
    Idle,
    Merging,
    Merged,
    Failed,
}

impl MergeState {
    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, MergeState::Merged | MergeState::Failed)
    }
}

/// Summary of a completed merge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Branch whose entries were appended.
    pub source: String,
    /// Branch that received the entries.
    pub target: String,
    /// Number of entries appended to the target.
    pub appended: usize,
    /// Terminal state reached.
    pub state: MergeState,
}

/// Drives a single merge of `source` into `target`.
#[derive(Debug)]
pub struct MergeMachine {
    source: String,
    target: String,
    state: MergeState,
}

impl MergeMachine {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            state: MergeState::Idle,
        }
    }

    pub fn state(&self) -> MergeState {
        self.state
    }

    /// `Idle -> Merging`: confirm both branches exist.
    pub fn begin(&mut self, store: &BranchStore) -> MergeResult<()> {
        if self.state != MergeState::Idle {
            return Err(MergeError::InvalidTransition {
                from: self.state,
                step: "begin",
            });
        }
        for name in [&self.source, &self.target] {
            if !store.contains(name) {
                self.state = MergeState::Failed;
                return Err(RefError::NotFound { name: name.clone() }.into());
            }
        }
        self.state = MergeState::Merging;
        debug!(source = %self.source, target = %self.target, "merge started");
        Ok(())
    }

    /// `Merging -> Merged`: append the source log onto the target log.
    pub fn apply(&mut self, store: &mut BranchStore) -> MergeResult<MergeOutcome> {
        if self.state != MergeState::Merging {
            return Err(MergeError::InvalidTransition {
                from: self.state,
                step: "apply",
            });
        }

        let entries = match store.entries(&self.source) {
            Ok(entries) => entries.to_vec(),
            Err(e) => {
                self.state = MergeState::Failed;
                return Err(e.into());
            }
        };
        let appended = match store.append(&self.target, entries) {
            Ok(n) => n,
            Err(e) => {
                self.state = MergeState::Failed;
                return Err(e.into());
            }
        };

        self.state = MergeState::Merged;
        info!(source = %self.source, target = %self.target, appended, "merge complete");
        Ok(MergeOutcome {
            source: self.source.clone(),
            target: self.target.clone(),
            appended,
            state: self.state,
        })
    }
}

/// Merge `source` into `target` in one call.
///
/// On error the store is left unchanged.
pub fn merge_branch(store: &mut BranchStore, target: &str, source: &str) -> MergeResult<MergeOutcome> {
    let mut machine = MergeMachine::new(source, target);
    machine.begin(store)?;
    machine.apply(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcs_types::SnapshotEntry;

    fn entry(path: &str, content: &str) -> SnapshotEntry {
        SnapshotEntry::new(path, content)
    }

    fn two_branches() -> BranchStore {
        let mut store = BranchStore::new();
        store.append("main", [entry("a.txt", "main-a")]).unwrap();
        store.fork("main", "dev").unwrap();
        store
            .append("dev", [entry("a.txt", "dev-a"), entry("b.txt", "dev-b")])
            .unwrap();
        store
    }

    #[test]
    fn merge_concatenates_in_order() {
        let mut store = two_branches();
        let outcome = merge_branch(&mut store, "main", "dev").unwrap();

        assert_eq!(outcome.state, MergeState::Merged);
        assert_eq!(outcome.appended, 3);
        let main: Vec<_> = store
            .entries("main")
            .unwrap()
            .iter()
            .map(|e| e.content.as_str())
            .collect();
        assert_eq!(main, ["main-a", "main-a", "dev-a", "dev-b"]);
    }

    #[test]
    fn merged_in_entries_win() {
        let mut store = two_branches();
        store.append("main", [entry("a.txt", "main-a2")]).unwrap();
        merge_branch(&mut store, "main", "dev").unwrap();

        let snap = store.snapshot("main").unwrap();
        assert_eq!(snap["a.txt"], "dev-a");
        assert_eq!(snap["b.txt"], "dev-b");
    }

    #[test]
    fn source_is_untouched() {
        let mut store = two_branches();
        let before = store.entries("dev").unwrap().to_vec();
        merge_branch(&mut store, "main", "dev").unwrap();
        assert_eq!(store.entries("dev").unwrap(), before.as_slice());
    }

    #[test]
    fn missing_source_fails_without_change() {
        let mut store = two_branches();
        let before = store.clone();
        let mut machine = MergeMachine::new("ghost", "main");
        let err = machine.begin(&store).unwrap_err();

        assert_eq!(
            err,
            MergeError::Ref(RefError::NotFound { name: "ghost".into() })
        );
        assert_eq!(machine.state(), MergeState::Failed);
        assert!(machine.state().is_terminal());
        assert!(machine.apply(&mut store).is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn self_merge_duplicates_log() {
        let mut store = two_branches();
        let outcome = merge_branch(&mut store, "dev", "dev").unwrap();
        assert_eq!(outcome.appended, 3);
        assert_eq!(store.entries("dev").unwrap().len(), 6);
    }

    #[test]
    fn apply_before_begin_is_rejected() {
        let mut store = two_branches();
        let mut machine = MergeMachine::new("dev", "main");
        assert_eq!(machine.state(), MergeState::Idle);
        let err = machine.apply(&mut store).unwrap_err();
        assert!(matches!(err, MergeError::InvalidTransition { from: MergeState::Idle, .. }));
    }
}
