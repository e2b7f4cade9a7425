//! The ignore list: paths permanently excluded from staging.
//!
//! Persisted as `.vcsignore`, one path per line. Blank lines are skipped.
//! Matching is exact on the normalized path; there are no glob patterns.

use std::collections::BTreeSet;

/// Set of ignored paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IgnoreList {
    paths: BTreeSet<String>,
}

impl IgnoreList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `.vcsignore` content.
    pub fn parse(content: &str) -> Self {
        let paths = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { paths }
    }

    /// Insert a path. Returns `false` if it was already ignored.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.paths.insert(path.into())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Read-only view of the ignored paths.
    pub fn paths(&self) -> &BTreeSet<String> {
        &self.paths
    }

    /// Render in the persisted newline-separated format.
    pub fn render(&self) -> String {
        self.paths.iter().map(|p| format!("{p}\n")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_blank_lines() {
        let list = IgnoreList::parse("a.txt\n\n  b.txt  \n\n");
        assert_eq!(list.paths().len(), 2);
        assert!(list.contains("a.txt"));
        assert!(list.contains("b.txt"));
    }

    #[test]
    fn insert_is_idempotent() {
        let mut list = IgnoreList::new();
        assert!(list.insert("x.log"));
        assert!(!list.insert("x.log"));
        assert_eq!(list.paths().len(), 1);
    }

    #[test]
    fn render_parses_back() {
        let mut list = IgnoreList::new();
        list.insert("b");
        list.insert("a");
        assert_eq!(list.render(), "a\nb\n");
        assert_eq!(IgnoreList::parse(&list.render()), list);
    }

    #[test]
    fn duplicate_lines_collapse() {
        let list = IgnoreList::parse("a\na\na\n");
        assert_eq!(list.paths().len(), 1);
    }
}
