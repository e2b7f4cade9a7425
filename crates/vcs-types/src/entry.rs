//! Branch snapshot entries.

use serde::{Deserialize, Serialize};

/// One `{file, content}` pair appended to a branch's log at commit time.
///
/// A branch is an append-only sequence of these. The same path may appear
/// many times; the latest entry for a path is its current content.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Path relative to the repository root.
    #[serde(rename = "file")]
    pub path: String,
    /// Full file content at commit time.
    pub content: String,
}

impl SnapshotEntry {
    /// Create a new snapshot entry.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_path_as_file() {
        let entry = SnapshotEntry::new("a.txt", "hello");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({"file": "a.txt", "content": "hello"}));
    }

    #[test]
    fn deserializes_persisted_shape() {
        let entry: SnapshotEntry =
            serde_json::from_str(r#"{"file":"dir/b.txt","content":"x\ny\n"}"#).unwrap();
        assert_eq!(entry.path, "dir/b.txt");
        assert_eq!(entry.content, "x\ny\n");
    }
}
