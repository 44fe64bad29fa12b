//! Aligns which entries exist on the slave with the master's set.

use std::collections::BTreeSet;
use std::sync::Arc;
use tandem_core::{EndpointRole, SyncEndpoint, SyncEntry, SyncResult, VocabularyMap};
use tracing::{debug, info};

/// Makes the set of entry identities on the slave match the master.
///
/// The master is membership-authoritative: slave entries with no master
/// counterpart are deleted, master entries with no slave counterpart are
/// created with a translated status. A master status with no forward
/// mapping means the entry is not representable on the slave yet; that id
/// is skipped silently for this pass, not treated as an error. Ids present
/// on both sides are left untouched — keeping their contents aligned is
/// the other reconcilers' job.
pub struct MembershipReconciler<M: SyncEndpoint, S: SyncEndpoint> {
    master: Arc<M>,
    slave: Arc<S>,
    vocabulary: Arc<VocabularyMap>,
}

impl<M: SyncEndpoint, S: SyncEndpoint> MembershipReconciler<M, S> {
    /// Creates a reconciler over a master/slave pair.
    pub fn new(master: Arc<M>, slave: Arc<S>, vocabulary: Arc<VocabularyMap>) -> Self {
        Self {
            master,
            slave,
            vocabulary,
        }
    }

    /// Runs one membership pass.
    ///
    /// An endpoint failure aborts the remainder of the pass; deletions and
    /// creations already issued stay applied.
    pub fn synchronize(&self) -> SyncResult<()> {
        let master_entries = self.master.get_all()?;
        let slave_entries = self.slave.get_all()?;

        let master_ids: BTreeSet<&str> = master_entries.iter().map(|e| e.id.as_str()).collect();
        let slave_ids: BTreeSet<&str> = slave_entries.iter().map(|e| e.id.as_str()).collect();

        let mut deleted = 0u64;
        for entry in slave_entries
            .iter()
            .filter(|e| !master_ids.contains(e.id.as_str()))
        {
            self.slave.delete(entry)?;
            deleted += 1;
        }

        let mut created = 0u64;
        let mut skipped = 0u64;
        for entry in master_entries
            .iter()
            .filter(|e| !slave_ids.contains(e.id.as_str()))
        {
            if !self.vocabulary.contains_key(EndpointRole::Master, &entry.status) {
                debug!(id = %entry.id, status = %entry.status, "no forward mapping, skipping create");
                skipped += 1;
                continue;
            }
            let status = self
                .vocabulary
                .mapped_value(EndpointRole::Master, &entry.status)?;
            let replica = SyncEntry::new(entry.id.clone(), status, entry.properties.clone());
            self.slave.create(&replica)?;
            created += 1;
        }

        info!(created, deleted, skipped, "membership pass complete");
        Ok(())
    }
}
