//! The branch store: branch name to append-only snapshot log.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vcs_types::SnapshotEntry;

use crate::error::{RefError, Result};
use crate::names::validate_branch_name;

/// The branch every repository starts with.
pub const DEFAULT_BRANCH: &str = "main";

/// Mapping from branch name to its ordered entry log.
///
/// Serialized as a JSON object of `name -> [{file, content}, ...]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchStore {
    branches: BTreeMap<String, Vec<SnapshotEntry>>,
}

impl Default for BranchStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchStore {
    /// A store holding only an empty `main` branch.
    pub fn new() -> Self {
        let mut branches = BTreeMap::new();
        branches.insert(DEFAULT_BRANCH.to_string(), Vec::new());
        Self { branches }
    }

    /// Re-insert an empty `main` if a loaded store lacks it.
    ///
    /// Returns `true` if the store had to be repaired.
    pub fn ensure_default(&mut self) -> bool {
        if self.branches.contains_key(DEFAULT_BRANCH) {
            return false;
        }
        self.branches.insert(DEFAULT_BRANCH.to_string(), Vec::new());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.branches.contains_key(name)
    }

    /// Branch names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.branches.keys().cloned().collect()
    }

    /// The full entry log of a branch, oldest first.
    pub fn entries(&self, name: &str) -> Result<&[SnapshotEntry]> {
        self.branches
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| RefError::NotFound {
                name: name.to_string(),
            })
    }

    /// Create `name` as a copy of `source`'s current log.
    pub fn fork(&mut self, source: &str, name: &str) -> Result<()> {
        validate_branch_name(name)?;
        if self.contains(name) {
            return Err(RefError::AlreadyExists {
                name: name.to_string(),
            });
        }
        let entries = self.entries(source)?.to_vec();
        debug!(source, branch = name, entries = entries.len(), "branch forked");
        self.branches.insert(name.to_string(), entries);
        Ok(())
    }

    /// Append entries to the end of a branch's log.
    pub fn append<I>(&mut self, name: &str, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = SnapshotEntry>,
    {
        let log = self
            .branches
            .get_mut(name)
            .ok_or_else(|| RefError::NotFound {
                name: name.to_string(),
            })?;
        let before = log.len();
        log.extend(entries);
        Ok(log.len() - before)
    }

    /// Current content of every path on a branch: the latest entry per path.
    pub fn snapshot(&self, name: &str) -> Result<BTreeMap<String, String>> {
        let mut latest = BTreeMap::new();
        for entry in self.entries(name)? {
            latest.insert(entry.path.clone(), entry.content.clone());
        }
        Ok(latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(path: &str, content: &str) -> SnapshotEntry {
        SnapshotEntry::new(path, content)
    }

    #[test]
    fn new_store_has_empty_main() {
        let store = BranchStore::new();
        assert_eq!(store.names(), vec!["main".to_string()]);
        assert!(store.entries("main").unwrap().is_empty());
    }

    #[test]
    fn persisted_shape() {
        let mut store = BranchStore::new();
        store.append("main", [entry("a.txt", "hello")]).unwrap();
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"main": [{"file": "a.txt", "content": "hello"}]})
        );
    }

    #[test]
    fn ensure_default_repairs_missing_main() {
        let mut store: BranchStore = serde_json::from_str(r#"{"dev": []}"#).unwrap();
        assert!(store.ensure_default());
        assert!(store.contains("main"));
        assert!(!store.ensure_default());
    }

    #[test]
    fn fork_copies_current_log() {
        let mut store = BranchStore::new();
        store.append("main", [entry("a.txt", "1")]).unwrap();
        store.fork("main", "dev").unwrap();
        assert_eq!(store.entries("dev").unwrap(), store.entries("main").unwrap());
    }

    #[test]
    fn fork_existing_name_fails() {
        let mut store = BranchStore::new();
        let err = store.fork("main", "main").unwrap_err();
        assert_eq!(err, RefError::AlreadyExists { name: "main".into() });
    }

    #[test]
    fn fork_missing_source_fails() {
        let mut store = BranchStore::new();
        let err = store.fork("ghost", "dev").unwrap_err();
        assert_eq!(err, RefError::NotFound { name: "ghost".into() });
        assert!(!store.contains("dev"));
    }

    #[test]
    fn fork_invalid_name_fails() {
        let mut store = BranchStore::new();
        assert!(matches!(
            store.fork("main", "bad name"),
            Err(RefError::InvalidBranchName { .. })
        ));
    }

    #[test]
    fn append_to_missing_branch_fails() {
        let mut store = BranchStore::new();
        let err = store.append("nope", [entry("a", "b")]).unwrap_err();
        assert!(matches!(err, RefError::NotFound { .. }));
    }

    #[test]
    fn snapshot_latest_entry_wins() {
        let mut store = BranchStore::new();
        store
            .append(
                "main",
                [entry("a.txt", "v1"), entry("b.txt", "b"), entry("a.txt", "v2")],
            )
            .unwrap();
        let snap = store.snapshot("main").unwrap();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap["a.txt"], "v2");
        assert_eq!(snap["b.txt"], "b");
    }

    proptest! {
        #[test]
        fn forked_branches_diverge_independently(
            shared in proptest::collection::vec("[a-z]{1,6}", 0..5),
            on_main in proptest::collection::vec("[a-z]{1,6}", 1..5),
            on_dev in proptest::collection::vec("[a-z]{1,6}", 1..5),
        ) {
            let mut store = BranchStore::new();
            store.append("main", shared.iter().map(|p| entry(p, "shared"))).unwrap();
            store.fork("main", "dev").unwrap();

            store.append("main", on_main.iter().map(|p| entry(p, "main"))).unwrap();
            store.append("dev", on_dev.iter().map(|p| entry(p, "dev"))).unwrap();

            let main_log = store.entries("main").unwrap();
            let dev_log = store.entries("dev").unwrap();
            prop_assert_eq!(main_log.len(), shared.len() + on_main.len());
            prop_assert_eq!(dev_log.len(), shared.len() + on_dev.len());
            prop_assert!(main_log.iter().all(|e| e.content != "dev"));
            prop_assert!(dev_log.iter().all(|e| e.content != "main"));
        }
    }
}
