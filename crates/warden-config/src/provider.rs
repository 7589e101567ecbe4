//! File-backed internal users provider
//!
//! Serves the `internalusers` snapshot parsed from a TOML file and replaces it
//! wholesale when the file is reloaded.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use tracing::{debug, error, info, warn};
use warden_auth::{IdentityStore, SnapshotProvider, SnapshotStore};

use crate::users_file::load_users;
use crate::{ConfigError, Result};

/// Internal users provider reading from a file on disk.
#[derive(Debug)]
pub struct FileIdentityProvider {
    path: PathBuf,
    snapshots: SnapshotStore,
}

impl FileIdentityProvider {
    /// Creates a provider for `path` without loading it.
    ///
    /// Until the first successful [`reload`](Self::reload) the provider
    /// reports the store as not loaded.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshots: SnapshotStore::empty(),
        }
    }

    /// Creates a provider and loads `path` immediately.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let provider = Self::new(path);
        provider.reload()?;
        Ok(provider)
    }

    /// The users file this provider reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The snapshot currently served, if any.
    pub fn snapshot(&self) -> Option<Arc<IdentityStore>> {
        self.snapshots.load()
    }

    /// Re-reads the users file and publishes it as the new snapshot.
    ///
    /// On failure the previously published snapshot stays in place.
    /// Returns the number of records now served.
    pub fn reload(&self) -> Result<usize> {
        match load_users(&self.path) {
            Ok(store) => {
                let records = store.len();
                self.snapshots.replace(store);
                info!(path = %self.path.display(), records, "Internal users loaded");
                Ok(records)
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    keeping_previous = self.snapshots.is_loaded(),
                    "Internal users reload failed"
                );
                Err(e)
            }
        }
    }

    /// Starts reloading the users file whenever it changes.
    ///
    /// The parent directory is watched so that editors replacing the file
    /// atomically are picked up. Watching stops when the handle is dropped.
    pub fn watch(self: &Arc<Self>, debounce: Duration) -> Result<WatchHandle> {
        let watch_path = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let provider = Arc::clone(self);
        let mut debouncer = new_debouncer(debounce, move |res: DebounceEventResult| match res {
            Ok(events) => {
                let touched = events
                    .iter()
                    .any(|event| event.path.file_name() == provider.path.file_name());
                if touched {
                    debug!(path = %provider.path.display(), "Internal users file changed");
                    let _ = provider.reload();
                }
            }
            Err(e) => {
                error!("File watcher error: {:?}", e);
            }
        })
        .map_err(|e| ConfigError::watcher(format!("failed to create file watcher: {e}")))?;

        debouncer
            .watcher()
            .watch(&watch_path, RecursiveMode::NonRecursive)
            .map_err(|e| {
                ConfigError::watcher(format!("failed to watch {}: {e}", watch_path.display()))
            })?;

        info!(path = %self.path.display(), "Started watching internal users file");
        Ok(WatchHandle {
            _debouncer: debouncer,
        })
    }
}

impl SnapshotProvider for FileIdentityProvider {
    fn current_snapshot(&self, store: &str) -> Option<Arc<IdentityStore>> {
        self.snapshots.current_snapshot(store)
    }
}

/// Keeps a file watcher alive. Dropping it stops watching.
pub struct WatchHandle {
    _debouncer: Debouncer<RecommendedWatcher>,
}

impl WatchHandle {
    /// Stop the watcher
    pub fn stop(self) {
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_auth::INTERNAL_USERS_STORE;

    #[test]
    fn test_new_is_not_loaded() {
        let provider = FileIdentityProvider::new("/nonexistent/users.toml");
        assert!(provider.current_snapshot(INTERNAL_USERS_STORE).is_none());
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileIdentityProvider::open(dir.path().join("users.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_reload_keeps_previous_snapshot_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.toml");
        std::fs::write(&path, "[alice]\nroles = [\"reader\"]\n").unwrap();

        let provider = FileIdentityProvider::open(&path).unwrap();
        let before = provider.snapshot().unwrap();

        std::fs::write(&path, "[alice\n").unwrap();
        assert!(provider.reload().is_err());

        let after = provider.current_snapshot(INTERNAL_USERS_STORE).unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_reload_replaces_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.toml");
        std::fs::write(&path, "[alice]\nroles = [\"reader\"]\n").unwrap();

        let provider = FileIdentityProvider::open(&path).unwrap();
        let before = provider.snapshot().unwrap();

        std::fs::write(&path, "[alice]\nroles = [\"reader\"]\n\n[bob]\nroles = []\n").unwrap();
        assert_eq!(provider.reload().unwrap(), 2);

        assert_eq!(before.len(), 1);
        assert!(provider.snapshot().unwrap().get("bob").is_some());
    }
}
