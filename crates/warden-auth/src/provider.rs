//! Snapshot provider for the internal users store.
//!
//! The backend never owns the internal users. It asks a [`SnapshotProvider`]
//! for the current snapshot at the start of every operation and drops the
//! reference when the operation ends.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::debug;

use crate::types::IdentityStore;

/// Name of the store the internal backend requests from its provider.
pub const INTERNAL_USERS_STORE: &str = "internalusers";

/// Source of identity store snapshots.
///
/// Implementations must hand out snapshots that are never mutated after
/// being shared; a reload publishes a new snapshot instead.
pub trait SnapshotProvider: Send + Sync {
    /// Returns the current snapshot of `store`, or `None` when it has not
    /// been loaded yet. An empty snapshot is not the same as `None`.
    fn current_snapshot(&self, store: &str) -> Option<Arc<IdentityStore>>;
}

impl<P: SnapshotProvider + ?Sized> SnapshotProvider for Arc<P> {
    fn current_snapshot(&self, store: &str) -> Option<Arc<IdentityStore>> {
        (**self).current_snapshot(store)
    }
}

/// In-memory snapshot holder with atomic wholesale replacement.
///
/// Reads are a single atomic load and never block writers; readers that
/// already fetched a snapshot keep it alive until they drop it.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: ArcSwapOption<IdentityStore>,
}

impl SnapshotStore {
    /// Creates a holder in the "not loaded" state.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            current: ArcSwapOption::empty(),
        }
    }

    /// Creates a holder with an initial snapshot.
    #[must_use]
    pub fn with_snapshot(store: IdentityStore) -> Self {
        Self {
            current: ArcSwapOption::new(Some(Arc::new(store))),
        }
    }

    /// Publishes a new snapshot, returning the one it replaced.
    pub fn replace(&self, store: IdentityStore) -> Option<Arc<IdentityStore>> {
        debug!(records = store.len(), "Publishing internal users snapshot");
        self.current.swap(Some(Arc::new(store)))
    }

    /// Drops the current snapshot, returning to the "not loaded" state.
    pub fn clear(&self) -> Option<Arc<IdentityStore>> {
        self.current.swap(None)
    }

    /// Returns the current snapshot, if any.
    #[must_use]
    pub fn load(&self) -> Option<Arc<IdentityStore>> {
        self.current.load_full()
    }

    /// Returns `true` once a snapshot has been published.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.current.load().is_some()
    }
}

impl SnapshotProvider for SnapshotStore {
    fn current_snapshot(&self, store: &str) -> Option<Arc<IdentityStore>> {
        if store != INTERNAL_USERS_STORE {
            return None;
        }
        self.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IdentityRecord;

    fn store_with(key: &str) -> IdentityStore {
        [(key, IdentityRecord::default())].into_iter().collect()
    }

    #[test]
    fn test_empty_is_not_loaded() {
        let holder = SnapshotStore::empty();
        assert!(!holder.is_loaded());
        assert!(holder.current_snapshot(INTERNAL_USERS_STORE).is_none());
    }

    #[test]
    fn test_empty_snapshot_is_loaded() {
        let holder = SnapshotStore::with_snapshot(IdentityStore::default());
        assert!(holder.is_loaded());
        let snapshot = holder.current_snapshot(INTERNAL_USERS_STORE).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_replace_keeps_fetched_snapshot_intact() {
        let holder = SnapshotStore::with_snapshot(store_with("alice"));
        let before = holder.current_snapshot(INTERNAL_USERS_STORE).unwrap();

        let replaced = holder.replace(store_with("bob")).unwrap();
        let after = holder.current_snapshot(INTERNAL_USERS_STORE).unwrap();

        assert!(Arc::ptr_eq(&before, &replaced));
        assert!(before.get("alice").is_some());
        assert!(before.get("bob").is_none());
        assert!(after.get("bob").is_some());
    }

    #[test]
    fn test_unknown_store_name() {
        let holder = SnapshotStore::with_snapshot(store_with("alice"));
        assert!(holder.current_snapshot("roles").is_none());
    }

    #[test]
    fn test_clear() {
        let holder = SnapshotStore::with_snapshot(store_with("alice"));
        assert!(holder.clear().is_some());
        assert!(!holder.is_loaded());
    }
}
