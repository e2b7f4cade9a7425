//! Branch-level diff: compare the current snapshots of two branches.
//!
//! Snapshots are `BTreeMap<String, String>` (path to latest content), so
//! every list in the result comes out sorted by path and the rendered
//! report is deterministic.

use std::collections::BTreeMap;
use std::fmt;

use crate::text_diff::{diff_text, TextDiff};

/// Report text when two branches have identical snapshots.
pub const NO_DIFFERENCES: &str = "no differences";

/// Content diff of one path present on both branches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileDiff {
    pub path: String,
    pub diff: TextDiff,
}

/// The result of comparing a base branch against another branch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BranchDiff {
    /// Name of the base (active) branch.
    pub base: String,
    /// Name of the branch compared against.
    pub other: String,
    /// Paths only on `other`.
    pub added: Vec<String>,
    /// Paths only on `base`.
    pub removed: Vec<String>,
    /// Paths on both whose latest content differs.
    pub modified: Vec<FileDiff>,
}

impl BranchDiff {
    /// Returns `true` if there are no added, removed or modified paths.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Number of paths that differ in any way.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    /// Look up the content diff for a modified path.
    pub fn modified_path(&self, path: &str) -> Option<&FileDiff> {
        self.modified.iter().find(|f| f.path == path)
    }
}

impl fmt::Display for BranchDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "{NO_DIFFERENCES}");
        }
        if !self.added.is_empty() {
            writeln!(f, "Added files:")?;
            for path in &self.added {
                writeln!(f, "  {path}")?;
            }
        }
        if !self.removed.is_empty() {
            writeln!(f, "Removed files:")?;
            for path in &self.removed {
                writeln!(f, "  {path}")?;
            }
        }
        if !self.modified.is_empty() {
            writeln!(f, "Modified files:")?;
            for file in &self.modified {
                let old_label = format!("{}/{}", self.base, file.path);
                let new_label = format!("{}/{}", self.other, file.path);
                write!(f, "{}", file.diff.render_unified(&old_label, &new_label))?;
            }
        }
        Ok(())
    }
}

/// Compare two branch snapshots.
///
/// Paths only in `other` are added, paths only in `base` are removed, and
/// paths in both with different content carry a line diff from the base
/// content to the other content.
pub fn diff_branches(
    base_name: &str,
    base: &BTreeMap<String, String>,
    other_name: &str,
    other: &BTreeMap<String, String>,
    context: usize,
) -> BranchDiff {
    let mut result = BranchDiff {
        base: base_name.to_string(),
        other: other_name.to_string(),
        ..Default::default()
    };

    for (path, base_content) in base {
        match other.get(path) {
            Some(other_content) if other_content != base_content => {
                result.modified.push(FileDiff {
                    path: path.clone(),
                    diff: diff_text(base_content, other_content, context),
                });
            }
            Some(_) => {}
            None => result.removed.push(path.clone()),
        }
    }

    result.added = other
        .keys()
        .filter(|path| !base.contains_key(*path))
        .cloned()
        .collect();

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn identical_snapshots_report_no_differences() {
        let snap = snapshot(&[("a.txt", "hello\n")]);
        let diff = diff_branches("main", &snap, "dev", &snap, 3);
        assert!(diff.is_empty());
        assert_eq!(diff.to_string(), "no differences\n");
    }

    #[test]
    fn empty_snapshots_report_no_differences() {
        let diff = diff_branches("main", &BTreeMap::new(), "dev", &BTreeMap::new(), 3);
        assert!(diff.is_empty());
    }

    #[test]
    fn added_removed_modified() {
        let base = snapshot(&[("keep", "same\n"), ("gone", "x\n"), ("edit", "old\n")]);
        let other = snapshot(&[("keep", "same\n"), ("edit", "new\n"), ("new", "y\n")]);

        let diff = diff_branches("main", &base, "dev", &other, 3);
        assert_eq!(diff.added, vec!["new".to_string()]);
        assert_eq!(diff.removed, vec!["gone".to_string()]);
        assert_eq!(diff.modified.len(), 1);
        assert_eq!(diff.len(), 3);

        let edit = diff.modified_path("edit").unwrap();
        assert_eq!(edit.diff.additions(), 1);
        assert_eq!(edit.diff.deletions(), 1);
    }

    #[test]
    fn rendered_report() {
        let base = snapshot(&[("a.txt", "one\n"), ("old.txt", "o\n")]);
        let other = snapshot(&[("a.txt", "two\n"), ("b.txt", "b\n")]);

        let diff = diff_branches("main", &base, "dev", &other, 3);
        assert_eq!(
            diff.to_string(),
            "Added files:\n  b.txt\n\
             Removed files:\n  old.txt\n\
             Modified files:\n\
             --- main/a.txt\n+++ dev/a.txt\n@@ -1,1 +1,1 @@\n-one\n+two\n"
        );
    }

    #[test]
    fn report_is_sorted_by_path() {
        let base = BTreeMap::new();
        let other = snapshot(&[("z", "1"), ("a", "1"), ("m", "1")]);
        let diff = diff_branches("main", &base, "dev", &other, 3);
        assert_eq!(diff.added, vec!["a", "m", "z"]);
    }
}
