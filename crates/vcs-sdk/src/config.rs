use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vcs_diff::DEFAULT_CONTEXT;

use crate::error::{VcsError, VcsResult};

/// Configuration for the repository engine.
///
/// Every field has a default, so a TOML file only needs the keys it
/// changes:
///
/// ```toml
/// root = "/srv/repos"
///
/// [lock]
/// enabled = true
/// timeout_ms = 2000
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding repositories; repository `name` lives at
    /// `<root>/<name>`.
    pub root: PathBuf,
    pub lock: LockConfig,
    pub diff: DiffConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            lock: LockConfig::default(),
            diff: DiffConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Default configuration rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> VcsResult<Self> {
        toml::from_str(text).map_err(|e| VcsError::Config(e.to_string()))
    }

    /// Load a TOML configuration file.
    pub fn load(path: &Path) -> VcsResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| VcsError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}

/// Advisory locking around each mutating read-modify-write cycle.
///
/// Off by default: without it, concurrent writers from different
/// processes are last-writer-wins per state file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    pub enabled: bool,
    /// How long to poll for the lock before giving up.
    pub timeout_ms: u64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_ms: 5_000,
        }
    }
}

impl LockConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Unchanged lines shown around each change.
    pub context_lines: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = EngineConfig::default();
        assert_eq!(c.root, PathBuf::from("."));
        assert!(!c.lock.enabled);
        assert_eq!(c.lock.timeout(), Duration::from_secs(5));
        assert_eq!(c.diff.context_lines, 3);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = EngineConfig::from_toml_str("root = \"/srv/repos\"\n[lock]\nenabled = true\n").unwrap();
        assert_eq!(c.root, PathBuf::from("/srv/repos"));
        assert!(c.lock.enabled);
        assert_eq!(c.lock.timeout_ms, 5_000);
        assert_eq!(c.diff.context_lines, 3);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = EngineConfig::from_toml_str("root = [").unwrap_err();
        assert!(matches!(err, VcsError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vcs.toml");
        std::fs::write(&path, "[diff]\ncontext_lines = 1\n").unwrap();
        let c = EngineConfig::load(&path).unwrap();
        assert_eq!(c.diff.context_lines, 1);
    }

    #[test]
    fn load_missing_file() {
        let err = EngineConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, VcsError::Config(_)));
    }
}
