//! In-memory read cache over any endpoint.

use parking_lot::RwLock;
use tandem_core::{SyncEndpoint, SyncEntry, SyncResult};
use tracing::debug;

/// A fetch-through read cache decorating another [`SyncEndpoint`].
///
/// The first `get_all` populates an ordered snapshot; later calls return
/// it without touching the inner endpoint. Writes always delegate to the
/// inner endpoint first, then maintain the snapshot if one exists:
/// `create` appends, `delete` removes the first structurally-equal entry,
/// and the three update operations replace the cached entry at the
/// matching id with the submitted snapshot. If no snapshot exists yet, a
/// write leaves the cache empty and the next `get_all` fetches fresh, so
/// there is no "must fetch before writing" precondition.
///
/// The snapshot never expires on its own. Mutating the inner endpoint
/// around the decorator leaves it stale until [`invalidate`] is called.
/// One decorator must not be shared by concurrent passes without external
/// serialization: each operation is atomic, but a pass interleaved
/// between two operations can still lose updates.
///
/// Composition is the assembler's choice — wrap whichever endpoints are
/// expensive to read, and stack further decorators (audit logging, say)
/// in whatever order suits the deployment.
///
/// [`invalidate`]: CachingSyncEndpoint::invalidate
pub struct CachingSyncEndpoint<E: SyncEndpoint> {
    inner: E,
    snapshot: RwLock<Option<Vec<SyncEntry>>>,
}

impl<E: SyncEndpoint> CachingSyncEndpoint<E> {
    /// Wraps an endpoint with an unpopulated cache.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            snapshot: RwLock::new(None),
        }
    }

    /// Drops the snapshot; the next `get_all` fetches from the inner
    /// endpoint again.
    pub fn invalidate(&self) {
        *self.snapshot.write() = None;
    }

    /// Returns true if a snapshot is currently held.
    pub fn is_populated(&self) -> bool {
        self.snapshot.read().is_some()
    }

    /// Consumes the decorator, returning the inner endpoint.
    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: SyncEndpoint> SyncEndpoint for CachingSyncEndpoint<E> {
    fn get_all(&self) -> SyncResult<Vec<SyncEntry>> {
        if let Some(cached) = self.snapshot.read().as_ref() {
            return Ok(cached.clone());
        }

        let fetched = self.inner.get_all()?;
        debug!(entries = fetched.len(), "cache populated");
        let mut snapshot = self.snapshot.write();
        // A concurrent populate may have won the race; the fresher fetch
        // replaces it either way.
        *snapshot = Some(fetched.clone());
        Ok(fetched)
    }

    fn create(&self, entry: &SyncEntry) -> SyncResult<()> {
        self.inner.create(entry)?;
        if let Some(cached) = self.snapshot.write().as_mut() {
            cached.push(entry.clone());
        }
        Ok(())
    }

    fn delete(&self, entry: &SyncEntry) -> SyncResult<()> {
        self.inner.delete(entry)?;
        if let Some(cached) = self.snapshot.write().as_mut() {
            if let Some(position) = cached.iter().position(|e| e == entry) {
                cached.remove(position);
            }
        }
        Ok(())
    }

    fn update_status(&self, entry: &SyncEntry) -> SyncResult<()> {
        self.inner.update_status(entry)?;
        self.replace_cached(entry);
        Ok(())
    }

    fn update_properties(&self, entry: &SyncEntry) -> SyncResult<()> {
        self.inner.update_properties(entry)?;
        self.replace_cached(entry);
        Ok(())
    }

    fn update_data(&self, entry: &SyncEntry) -> SyncResult<()> {
        self.inner.update_data(entry)?;
        self.replace_cached(entry);
        Ok(())
    }
}

impl<E: SyncEndpoint> CachingSyncEndpoint<E> {
    // Reconcilers submit full snapshots, so replacing the whole cached
    // entry matches what the inner endpoint now holds.
    fn replace_cached(&self, entry: &SyncEntry) {
        if let Some(cached) = self.snapshot.write().as_mut() {
            if let Some(stored) = cached.iter_mut().find(|e| e.id == entry.id) {
                *stored = entry.clone();
            }
        }
    }
}
