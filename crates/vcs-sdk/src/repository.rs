use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info, warn};
use vcs_diff::{diff_branches, BranchDiff};
use vcs_index::{normalize_path, IgnoreList, StagingArea};
use vcs_ledger::CommitLog;
use vcs_merge::{merge_branch, MergeOutcome};
use vcs_refs::{BranchStore, DEFAULT_BRANCH};
use vcs_store::{
    DiskFileSystem, FileSystem, LockGuard, RepoLayout, StateFile, StateStore, StoreError,
};
use vcs_types::{validate_repo_name, CommitRecord, SnapshotEntry};

use crate::config::EngineConfig;
use crate::error::{VcsError, VcsResult};

/// One repository: its working tree under `<root>/<name>` and the state
/// kept in `<root>/<name>/.vcs`.
///
/// Every operation reloads the structures it needs from the state files
/// and mutating operations rewrite them completely before returning, so
/// two `Repository` values over the same directory see each other's
/// completed writes. The active branch is the only in-memory state.
pub struct Repository {
    name: String,
    config: EngineConfig,
    state: StateStore,
    active_branch: String,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("name", &self.name)
            .field("active_branch", &self.active_branch)
            .field("work_dir", &self.work_dir())
            .finish()
    }
}

impl Repository {
    /// Create a new repository on disk.
    pub fn init(config: EngineConfig, name: &str) -> VcsResult<Self> {
        Self::init_with(Arc::new(DiskFileSystem::new()), config, name)
    }

    /// Create a new repository through `fs`.
    ///
    /// Fails with [`VcsError::RepositoryExists`] when `<root>/<name>/.vcs`
    /// is already present. An existing working directory without state is
    /// adopted as-is.
    pub fn init_with(fs: Arc<dyn FileSystem>, config: EngineConfig, name: &str) -> VcsResult<Self> {
        validate_repo_name(name)?;
        let state = StateStore::new(fs, RepoLayout::new(&config.root, name));
        if state.is_initialized() {
            return Err(VcsError::RepositoryExists(name.to_string()));
        }

        state.create_vcs_dir()?;
        state.write_json(StateFile::History, &CommitLog::new())?;
        state.write_json(StateFile::Staged, &StagingArea::new())?;
        state.write_json(StateFile::Branches, &BranchStore::new())?;
        state.write_text(StateFile::Ignore, "")?;
        state.write_text(StateFile::Head, &format!("{DEFAULT_BRANCH}\n"))?;

        info!(repo = name, work_dir = %state.layout().work_dir().display(), "repository initialized");
        Ok(Self {
            name: name.to_string(),
            config,
            state,
            active_branch: DEFAULT_BRANCH.to_string(),
        })
    }

    /// Open an existing repository on disk.
    pub fn open(config: EngineConfig, name: &str) -> VcsResult<Self> {
        Self::open_with(Arc::new(DiskFileSystem::new()), config, name)
    }

    /// Open an existing repository through `fs`.
    pub fn open_with(fs: Arc<dyn FileSystem>, config: EngineConfig, name: &str) -> VcsResult<Self> {
        validate_repo_name(name)?;
        let state = StateStore::new(fs, RepoLayout::new(&config.root, name));
        if !state.is_initialized() {
            return Err(VcsError::RepositoryNotFound(name.to_string()));
        }

        let mut repo = Self {
            name: name.to_string(),
            config,
            state,
            active_branch: DEFAULT_BRANCH.to_string(),
        };
        repo.active_branch = repo.read_head()?;
        debug!(repo = name, branch = %repo.active_branch, "repository opened");
        Ok(repo)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The branch commits are recorded on.
    pub fn active_branch(&self) -> &str {
        &self.active_branch
    }

    /// The repository's working directory.
    pub fn work_dir(&self) -> &Path {
        self.state.layout().work_dir()
    }

    // ---- Working tree operations ----

    /// Stage a working-tree path for the next commit.
    ///
    /// Returns the normalized path. Staging a path twice is a no-op.
    pub fn add(&self, path: &str) -> VcsResult<String> {
        let _guard = self.write_guard()?;
        let ignore = self.load_ignore()?;
        let mut staging = self.load_staging()?;

        let (path, added) =
            staging.stage(path, &ignore, self.state.fs().as_ref(), self.work_dir())?;
        if added {
            self.state.write_json(StateFile::Staged, &staging)?;
        }

        info!(repo = %self.name, path = %path, added, staged = staging.len(), "path added");
        Ok(path)
    }

    /// Record every staged file on the active branch.
    ///
    /// All staged files are read before any state is written, and the
    /// three state files are rewritten as one unit. If a file is missing
    /// or a write fails, the stage, history and branches are left as they
    /// were.
    pub fn commit(&self, message: &str) -> VcsResult<CommitRecord> {
        let _guard = self.write_guard()?;
        let mut staging = self.load_staging()?;
        if staging.is_empty() {
            return Err(VcsError::NothingStaged);
        }
        if message.trim().is_empty() {
            return Err(VcsError::EmptyMessage);
        }

        let mut branches = self.load_branches()?;
        branches.entries(&self.active_branch)?;

        let mut entries = Vec::with_capacity(staging.len());
        for path in staging.paths() {
            let bytes = match self.state.fs().read_file(&self.state.layout().work_path(path)) {
                Ok(bytes) => bytes,
                Err(StoreError::NotFound(_)) => return Err(VcsError::FileNotFound(path.clone())),
                Err(e) => return Err(e.into()),
            };
            entries.push(SnapshotEntry::new(path.as_str(), decode_content(path, bytes)));
        }

        let files = staging.drain()?;
        let mut log = self.load_log()?;
        let record = log
            .append(message, files, Local::now().naive_local())?
            .clone();
        let appended = branches.append(&self.active_branch, entries)?;

        self.state.write_all(&[
            (StateFile::Branches, StateStore::encode_json(&branches)?),
            (StateFile::History, StateStore::encode_json(&log)?),
            (StateFile::Staged, StateStore::encode_json(&staging)?),
        ])?;

        info!(
            repo = %self.name,
            branch = %self.active_branch,
            message = record.message(),
            files = appended,
            "commit recorded"
        );
        Ok(record)
    }

    /// Add `path` to the ignore list and unstage it if it was staged.
    /// Returns `false` if it was already ignored.
    pub fn ignore(&self, path: &str) -> VcsResult<bool> {
        let path = normalize_path(path)?;
        let _guard = self.write_guard()?;
        let mut ignore = self.load_ignore()?;
        if !ignore.insert(path.clone()) {
            debug!(repo = %self.name, path = %path, "path already ignored");
            return Ok(false);
        }

        let mut staging = self.load_staging()?;
        let unstaged = staging.remove(&path);
        let mut files = vec![(StateFile::Ignore, ignore.render().into_bytes())];
        if unstaged {
            files.push((StateFile::Staged, StateStore::encode_json(&staging)?));
        }
        self.state.write_all(&files)?;

        info!(repo = %self.name, path = %path, unstaged, "path ignored");
        Ok(true)
    }

    /// Paths currently staged, in insertion order.
    pub fn staged_files(&self) -> VcsResult<Vec<String>> {
        Ok(self.load_staging()?.paths().to_vec())
    }

    pub fn view_ignore_list(&self) -> VcsResult<BTreeSet<String>> {
        Ok(self.load_ignore()?.paths().clone())
    }

    /// All commit records, oldest first.
    pub fn view_commit_history(&self) -> VcsResult<Vec<CommitRecord>> {
        Ok(self.load_log()?.records().to_vec())
    }

    // ---- Branch operations ----

    /// Create `name` as a copy of the active branch's entry log.
    pub fn create_branch(&self, name: &str) -> VcsResult<()> {
        let _guard = self.write_guard()?;
        let mut branches = self.load_branches()?;
        branches.fork(&self.active_branch, name)?;
        self.state.write_json(StateFile::Branches, &branches)?;

        info!(repo = %self.name, source = %self.active_branch, branch = name, "branch created");
        Ok(())
    }

    /// Make `name` the active branch. The stage is carried over unchanged.
    pub fn switch_branch(&mut self, name: &str) -> VcsResult<()> {
        let _guard = self.write_guard()?;
        let branches = self.load_branches()?;
        if !branches.contains(name) {
            return Err(VcsError::BranchNotFound(name.to_string()));
        }

        self.state.write_text(StateFile::Head, &format!("{name}\n"))?;
        info!(repo = %self.name, from = %self.active_branch, to = name, "branch switched");
        self.active_branch = name.to_string();
        Ok(())
    }

    /// Sorted branch names.
    pub fn list_branches(&self) -> VcsResult<Vec<String>> {
        Ok(self.load_branches()?.names())
    }

    /// The full entry log of one branch, oldest first.
    pub fn branch_entries(&self, name: &str) -> VcsResult<Vec<SnapshotEntry>> {
        Ok(self.load_branches()?.entries(name)?.to_vec())
    }

    /// Compare the active branch with `other`, using the latest entry per
    /// path on each side.
    pub fn diff(&self, other: &str) -> VcsResult<BranchDiff> {
        let branches = self.load_branches()?;
        let other_snapshot = branches.snapshot(other)?;
        let base_snapshot = branches.snapshot(&self.active_branch)?;

        let diff = diff_branches(
            &self.active_branch,
            &base_snapshot,
            other,
            &other_snapshot,
            self.config.diff.context_lines,
        );
        debug!(
            repo = %self.name,
            base = %self.active_branch,
            other,
            changes = diff.len(),
            "branches compared"
        );
        Ok(diff)
    }

    /// Append every entry of `other` onto the active branch.
    ///
    /// There is no conflict detection: a path changed on both branches
    /// takes the merged-in content, since the latest entry wins.
    pub fn merge(&self, other: &str) -> VcsResult<MergeOutcome> {
        let _guard = self.write_guard()?;
        let mut branches = self.load_branches()?;
        let outcome = merge_branch(&mut branches, &self.active_branch, other)?;
        self.state.write_json(StateFile::Branches, &branches)?;
        Ok(outcome)
    }

    // ---- Repository operations ----

    /// Copy the whole repository, working tree and state, to `new_name`
    /// under the same root and open the copy.
    pub fn clone_repository(&self, new_name: &str) -> VcsResult<Repository> {
        validate_repo_name(new_name)?;
        let target = RepoLayout::new(&self.config.root, new_name);
        let fs = self.state.fs();
        if fs.exists(target.work_dir()) {
            return Err(VcsError::RepositoryExists(new_name.to_string()));
        }

        let _guard = self.write_guard()?;
        fs.copy_tree(self.work_dir(), target.work_dir())
            .map_err(|e| match e {
                StoreError::AlreadyExists(_) => VcsError::RepositoryExists(new_name.to_string()),
                other => other.into(),
            })?;

        info!(repo = %self.name, clone = new_name, "repository cloned");
        Repository::open_with(Arc::clone(fs), self.config.clone(), new_name)
    }

    // ---- State loading ----

    fn write_guard(&self) -> VcsResult<LockGuard> {
        if !self.config.lock.enabled {
            return Ok(LockGuard::noop());
        }
        Ok(self.state.lock(self.config.lock.timeout())?)
    }

    fn read_head(&self) -> VcsResult<String> {
        if !self.state.has(StateFile::Head) {
            return Ok(DEFAULT_BRANCH.to_string());
        }
        let head = self.state.read_text(StateFile::Head)?;
        let head = head.trim();
        if head.is_empty() {
            warn!(repo = %self.name, "HEAD is empty; using the default branch");
            return Ok(DEFAULT_BRANCH.to_string());
        }
        if !self.load_branches()?.contains(head) {
            warn!(repo = %self.name, head, "HEAD names an unknown branch; using the default branch");
            return Ok(DEFAULT_BRANCH.to_string());
        }
        Ok(head.to_string())
    }

    fn load_staging(&self) -> VcsResult<StagingArea> {
        if !self.state.has(StateFile::Staged) {
            return Ok(StagingArea::new());
        }
        Ok(self.state.read_json(StateFile::Staged)?)
    }

    fn load_branches(&self) -> VcsResult<BranchStore> {
        if !self.state.has(StateFile::Branches) {
            return Ok(BranchStore::new());
        }
        let mut branches: BranchStore = self.state.read_json(StateFile::Branches)?;
        if branches.ensure_default() {
            warn!(repo = %self.name, "default branch missing from branches.json; restored it empty");
        }
        Ok(branches)
    }

    fn load_log(&self) -> VcsResult<CommitLog> {
        if !self.state.has(StateFile::History) {
            return Ok(CommitLog::new());
        }
        Ok(self.state.read_json(StateFile::History)?)
    }

    fn load_ignore(&self) -> VcsResult<IgnoreList> {
        if !self.state.has(StateFile::Ignore) {
            return Ok(IgnoreList::new());
        }
        Ok(IgnoreList::parse(&self.state.read_text(StateFile::Ignore)?))
    }
}

fn decode_content(path: &str, bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| {
        warn!(path, "file is not valid UTF-8; storing it lossily");
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    })
}
