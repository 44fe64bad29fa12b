//! The endpoint capability consumed by every reconciler.

use crate::entry::SyncEntry;
use crate::error::{SyncError, SyncResult};
use parking_lot::RwLock;

/// One side of a reconciliation pair.
///
/// Concrete implementations adapt a real system — a workflow tree, a
/// remote tracker's native protocol — to this contract; the engine never
/// sees anything else. All operations take entry snapshots: an endpoint
/// is expected to locate the stored entry by `entry.id` and apply the
/// fields the operation names.
///
/// Operations may fail with [`SyncError::Endpoint`] (or any other
/// `SyncError` an adapter chooses to surface); the reconciler running the
/// pass abandons the remainder of its batch on the first failure, and
/// writes issued earlier in the pass stay applied.
pub trait SyncEndpoint: Send + Sync {
    /// Returns a snapshot of every current entry.
    fn get_all(&self) -> SyncResult<Vec<SyncEntry>>;

    /// Creates a new entry.
    fn create(&self, entry: &SyncEntry) -> SyncResult<()>;

    /// Deletes the entry with this identity.
    fn delete(&self, entry: &SyncEntry) -> SyncResult<()>;

    /// Replaces the stored status with `entry.status`.
    fn update_status(&self, entry: &SyncEntry) -> SyncResult<()>;

    /// Replaces the stored properties with `entry.properties`.
    fn update_properties(&self, entry: &SyncEntry) -> SyncResult<()>;

    /// Replaces the stored properties and sequence, leaving status untouched.
    fn update_data(&self, entry: &SyncEntry) -> SyncResult<()>;
}

/// One recorded operation against a [`MemoryEndpoint`].
///
/// Mutating calls record the id they touched, which lets tests assert on
/// exact write counts per entry without inspecting endpoint internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointCall {
    /// `get_all` was invoked.
    GetAll,
    /// `create` was invoked for this id.
    Create(String),
    /// `delete` was invoked for this id.
    Delete(String),
    /// `update_status` was invoked for this id.
    UpdateStatus(String),
    /// `update_properties` was invoked for this id.
    UpdateProperties(String),
    /// `update_data` was invoked for this id.
    UpdateData(String),
}

/// An in-memory endpoint for tests and adapter development.
///
/// Entries live in insertion order behind a lock; every operation is
/// appended to a call log readable via
/// [`calls`](MemoryEndpoint::calls). [`set_failing`](MemoryEndpoint::set_failing)
/// makes every subsequent operation fail, for exercising abort paths.
#[derive(Debug, Default)]
pub struct MemoryEndpoint {
    entries: RwLock<Vec<SyncEntry>>,
    calls: RwLock<Vec<EndpointCall>>,
    failing: RwLock<bool>,
}

impl MemoryEndpoint {
    /// Creates an empty endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an endpoint seeded with entries, without recording calls.
    pub fn with_entries(entries: impl IntoIterator<Item = SyncEntry>) -> Self {
        Self {
            entries: RwLock::new(entries.into_iter().collect()),
            calls: RwLock::new(Vec::new()),
            failing: RwLock::new(false),
        }
    }

    /// Seeds an entry directly, without recording a call.
    pub fn seed(&self, entry: SyncEntry) {
        self.entries.write().push(entry);
    }

    /// Makes every subsequent operation fail when `failing` is true.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.write() = failing;
    }

    /// Returns the recorded operations, oldest first.
    pub fn calls(&self) -> Vec<EndpointCall> {
        self.calls.read().clone()
    }

    /// Clears the recorded operations.
    pub fn clear_calls(&self) {
        self.calls.write().clear();
    }

    /// Returns the current entries without recording a `get_all`.
    pub fn snapshot(&self) -> Vec<SyncEntry> {
        self.entries.read().clone()
    }

    /// Returns the entry with this id, if present.
    pub fn entry(&self, id: &str) -> Option<SyncEntry> {
        self.entries.read().iter().find(|e| e.id == id).cloned()
    }

    fn check_failing(&self) -> SyncResult<()> {
        if *self.failing.read() {
            Err(SyncError::endpoint("injected failure"))
        } else {
            Ok(())
        }
    }

    fn record(&self, call: EndpointCall) {
        self.calls.write().push(call);
    }
}

impl SyncEndpoint for MemoryEndpoint {
    fn get_all(&self) -> SyncResult<Vec<SyncEntry>> {
        self.check_failing()?;
        self.record(EndpointCall::GetAll);
        Ok(self.entries.read().clone())
    }

    fn create(&self, entry: &SyncEntry) -> SyncResult<()> {
        self.check_failing()?;
        self.record(EndpointCall::Create(entry.id.clone()));
        let mut entries = self.entries.write();
        if entries.iter().any(|e| e.id == entry.id) {
            return Err(SyncError::endpoint(format!(
                "entry {:?} already exists",
                entry.id
            )));
        }
        entries.push(entry.clone());
        Ok(())
    }

    fn delete(&self, entry: &SyncEntry) -> SyncResult<()> {
        self.check_failing()?;
        self.record(EndpointCall::Delete(entry.id.clone()));
        let mut entries = self.entries.write();
        let position = entries
            .iter()
            .position(|e| e.id == entry.id)
            .ok_or_else(|| SyncError::endpoint(format!("no entry {:?} to delete", entry.id)))?;
        entries.remove(position);
        Ok(())
    }

    fn update_status(&self, entry: &SyncEntry) -> SyncResult<()> {
        self.check_failing()?;
        self.record(EndpointCall::UpdateStatus(entry.id.clone()));
        let mut entries = self.entries.write();
        let stored = Self::find_mut(&mut entries, &entry.id)?;
        stored.status = entry.status.clone();
        Ok(())
    }

    fn update_properties(&self, entry: &SyncEntry) -> SyncResult<()> {
        self.check_failing()?;
        self.record(EndpointCall::UpdateProperties(entry.id.clone()));
        let mut entries = self.entries.write();
        let stored = Self::find_mut(&mut entries, &entry.id)?;
        stored.properties = entry.properties.clone();
        Ok(())
    }

    fn update_data(&self, entry: &SyncEntry) -> SyncResult<()> {
        self.check_failing()?;
        self.record(EndpointCall::UpdateData(entry.id.clone()));
        let mut entries = self.entries.write();
        let stored = Self::find_mut(&mut entries, &entry.id)?;
        stored.properties = entry.properties.clone();
        stored.sequence = entry.sequence;
        Ok(())
    }
}

impl MemoryEndpoint {
    fn find_mut<'a>(entries: &'a mut [SyncEntry], id: &str) -> SyncResult<&'a mut SyncEntry> {
        entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| SyncError::endpoint(format!("no entry {id:?} to update")))
    }
}
