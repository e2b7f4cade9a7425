//! Line-by-line comparison of file contents.
//!
//! Uses the `similar` crate (Myers diff, LCS-based) to produce grouped
//! hunks with context lines, rendered in unified-diff form.

use std::fmt::Write as _;

use similar::{ChangeTag, TextDiff as SimilarDiff};

/// Context lines kept around each change when none is configured.
pub const DEFAULT_CONTEXT: usize = 3;

/// The result of diffing two texts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextDiff {
    /// The diff hunks, in file order.
    pub hunks: Vec<DiffHunk>,
    /// Total number of lines in the old content.
    pub old_lines: usize,
    /// Total number of lines in the new content.
    pub new_lines: usize,
}

impl TextDiff {
    /// Returns `true` if the two texts are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Total number of lines added across all hunks.
    pub fn additions(&self) -> usize {
        self.count(|l| matches!(l, DiffLine::Added(_)))
    }

    /// Total number of lines removed across all hunks.
    pub fn deletions(&self) -> usize {
        self.count(|l| matches!(l, DiffLine::Removed(_)))
    }

    fn count(&self, pred: impl Fn(&DiffLine) -> bool) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| pred(l))
            .count()
    }

    /// Render as a unified diff block with `---`/`+++` headers.
    pub fn render_unified(&self, old_label: &str, new_label: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "--- {old_label}");
        let _ = writeln!(out, "+++ {new_label}");
        for hunk in &self.hunks {
            let _ = writeln!(
                out,
                "@@ -{},{} +{},{} @@",
                hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
            );
            for line in &hunk.lines {
                let _ = writeln!(out, "{line}");
            }
        }
        out
    }
}

/// A contiguous region of changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    /// Line in the old content where this hunk starts (1-based).
    pub old_start: usize,
    /// Number of old-content lines in this hunk.
    pub old_count: usize,
    /// Line in the new content where this hunk starts (1-based).
    pub new_start: usize,
    /// Number of new-content lines in this hunk.
    pub new_count: usize,
    pub lines: Vec<DiffLine>,
}

/// A single line in a diff hunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    /// Present in both old and new.
    Context(String),
    /// Only in the new content.
    Added(String),
    /// Only in the old content.
    Removed(String),
    /// The line before this one has no trailing newline.
    NoNewline,
}

impl std::fmt::Display for DiffLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffLine::Context(text) => write!(f, " {text}"),
            DiffLine::Added(text) => write!(f, "+{text}"),
            DiffLine::Removed(text) => write!(f, "-{text}"),
            DiffLine::NoNewline => f.write_str("\\ No newline at end of file"),
        }
    }
}

/// Compute a line diff between `old` and `new`, keeping `context` unchanged
/// lines around each change.
///
/// Identical inputs always produce the same hunks.
pub fn diff_text(old: &str, new: &str, context: usize) -> TextDiff {
    let old_lines = old.lines().count();
    let new_lines = new.lines().count();

    if old == new {
        return TextDiff {
            hunks: Vec::new(),
            old_lines,
            new_lines,
        };
    }

    let text_diff = SimilarDiff::from_lines(old, new);
    let mut hunks = Vec::new();

    for group in text_diff.grouped_ops(context) {
        let Some(first) = group.first() else {
            continue;
        };
        let mut hunk = DiffHunk {
            old_start: first.old_range().start + 1,
            old_count: 0,
            new_start: first.new_range().start + 1,
            new_count: 0,
            lines: Vec::new(),
        };

        for op in &group {
            for change in text_diff.iter_changes(op) {
                let text = change.value().trim_end_matches(['\n', '\r']).to_string();
                match change.tag() {
                    ChangeTag::Equal => {
                        hunk.lines.push(DiffLine::Context(text));
                        hunk.old_count += 1;
                        hunk.new_count += 1;
                    }
                    ChangeTag::Delete => {
                        hunk.lines.push(DiffLine::Removed(text));
                        hunk.old_count += 1;
                    }
                    ChangeTag::Insert => {
                        hunk.lines.push(DiffLine::Added(text));
                        hunk.new_count += 1;
                    }
                }
                if change.missing_newline() {
                    hunk.lines.push(DiffLine::NoNewline);
                }
            }
        }

        hunks.push(hunk);
    }

    TextDiff {
        hunks,
        old_lines,
        new_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_no_diff() {
        let diff = diff_text("hello\nworld\n", "hello\nworld\n", DEFAULT_CONTEXT);
        assert!(diff.is_empty());
        assert_eq!(diff.old_lines, 2);
    }

    #[test]
    fn single_line_addition() {
        let diff = diff_text("line1\nline2\n", "line1\nline2\nline3\n", DEFAULT_CONTEXT);
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.deletions(), 0);
    }

    #[test]
    fn modification_shows_remove_and_add() {
        let diff = diff_text("hello world\n", "hello universe\n", DEFAULT_CONTEXT);
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.deletions(), 1);
    }

    #[test]
    fn empty_to_content() {
        let diff = diff_text("", "new content\n", DEFAULT_CONTEXT);
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.old_lines, 0);
    }

    #[test]
    fn missing_trailing_newline_is_a_change() {
        let diff = diff_text("a\nb", "a\nb\n", DEFAULT_CONTEXT);
        assert!(!diff.is_empty());
        assert_eq!((diff.additions(), diff.deletions()), (1, 1));

        let text = diff.render_unified("old", "new");
        assert!(text.contains("-b\n\\ No newline at end of file\n+b\n"), "{text}");
        assert_eq!((diff.hunks[0].old_count, diff.hunks[0].new_count), (2, 2));
    }

    #[test]
    fn hunk_header_and_context() {
        let old = "a\nb\nc\nd\ne\nf\ng\nh\ni\nj\n";
        let new = "a\nb\nc\nd\nX\nf\ng\nh\ni\nj\n";
        let diff = diff_text(old, new, 3);

        assert_eq!(diff.hunks.len(), 1);
        let hunk = &diff.hunks[0];
        assert_eq!((hunk.old_start, hunk.old_count), (2, 7));
        assert_eq!((hunk.new_start, hunk.new_count), (2, 7));
        assert_eq!(hunk.lines[3], DiffLine::Removed("e".into()));
        assert_eq!(hunk.lines[4], DiffLine::Added("X".into()));
    }

    #[test]
    fn distant_changes_split_into_hunks() {
        let old: String = (1..=20).map(|i| format!("{i}\n")).collect();
        let new: String = (1..=20)
            .map(|i| match i {
                2 => "two\n".to_string(),
                19 => "nineteen\n".to_string(),
                _ => format!("{i}\n"),
            })
            .collect();
        let diff = diff_text(&old, &new, 1);
        assert_eq!(diff.hunks.len(), 2);
    }

    #[test]
    fn render_unified_block() {
        let diff = diff_text("one\ntwo\n", "one\n2\n", 3);
        let text = diff.render_unified("main/a.txt", "dev/a.txt");
        assert_eq!(
            text,
            "--- main/a.txt\n+++ dev/a.txt\n@@ -1,2 +1,2 @@\n one\n-two\n+2\n"
        );
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let a = diff_text("x\ny\nz\n", "x\nq\nz\n", 3);
        let b = diff_text("x\ny\nz\n", "x\nq\nz\n", 3);
        assert_eq!(a, b);
    }
}
