//! On-disk layout of a repository.

use std::path::{Path, PathBuf};

/// Name of the metadata directory inside every repository.
pub const VCS_DIR: &str = ".vcs";

/// The persisted state files of a repository.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateFile {
    /// Ordered commit records.
    History,
    /// Paths queued for the next commit.
    Staged,
    /// Branch name to entry log.
    Branches,
    /// Newline-separated ignored paths.
    Ignore,
    /// Active branch name.
    Head,
}

impl StateFile {
    /// All state files, in initialization order.
    pub const ALL: [StateFile; 5] = [
        StateFile::History,
        StateFile::Staged,
        StateFile::Branches,
        StateFile::Ignore,
        StateFile::Head,
    ];

    /// File name inside the `.vcs` directory.
    pub fn file_name(self) -> &'static str {
        match self {
            StateFile::History => "history.json",
            StateFile::Staged => "staged.json",
            StateFile::Branches => "branches.json",
            StateFile::Ignore => ".vcsignore",
            StateFile::Head => "HEAD",
        }
    }
}

/// Paths of one repository rooted at `<root>/<name>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoLayout {
    work_dir: PathBuf,
}

impl RepoLayout {
    /// Layout for the repository `name` under `root`.
    pub fn new(root: impl AsRef<Path>, name: &str) -> Self {
        Self {
            work_dir: root.as_ref().join(name),
        }
    }

    /// The working tree (repository directory).
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// The `.vcs` metadata directory.
    pub fn vcs_dir(&self) -> PathBuf {
        self.work_dir.join(VCS_DIR)
    }

    /// Path of one state file.
    pub fn state_file(&self, file: StateFile) -> PathBuf {
        self.vcs_dir().join(file.file_name())
    }

    /// Lock file used when repository locking is enabled.
    pub fn lock_file(&self) -> PathBuf {
        self.vcs_dir().join("vcs.lock")
    }

    /// Resolve a working-tree relative path.
    pub fn work_path(&self, relative: &str) -> PathBuf {
        self.work_dir.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_paths() {
        let layout = RepoLayout::new("/tmp/repos", "proj");
        assert_eq!(layout.work_dir(), Path::new("/tmp/repos/proj"));
        assert_eq!(
            layout.state_file(StateFile::History),
            PathBuf::from("/tmp/repos/proj/.vcs/history.json")
        );
        assert_eq!(
            layout.state_file(StateFile::Ignore),
            PathBuf::from("/tmp/repos/proj/.vcs/.vcsignore")
        );
        assert_eq!(layout.work_path("a.txt"), PathBuf::from("/tmp/repos/proj/a.txt"));
    }

    #[test]
    fn file_names_are_distinct() {
        let mut names: Vec<_> = StateFile::ALL.iter().map(|f| f.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), StateFile::ALL.len());
    }
}
