//! Unconditionally pushes master properties into matching slave entries.

use std::collections::BTreeMap;
use std::sync::Arc;
use tandem_core::{EndpointRole, SyncEndpoint, SyncEntry, SyncResult, VocabularyMap};
use tracing::info;

/// Pushes the master's properties into every slave entry that exists on
/// both sides, every pass, with no diff check.
///
/// Matching works exactly as in
/// [`StatusReconciler`](crate::StatusReconciler): every slave status is
/// translated into the master's vocabulary first, and an untranslatable
/// status aborts the pass with `MappingNotFound`. The submitted entry
/// carries the master's status re-expressed in the slave vocabulary and
/// no sequence number.
pub struct PropertyReconciler<M: SyncEndpoint, S: SyncEndpoint> {
    master: Arc<M>,
    slave: Arc<S>,
    vocabulary: Arc<VocabularyMap>,
}

impl<M: SyncEndpoint, S: SyncEndpoint> PropertyReconciler<M, S> {
    /// Creates a reconciler over a master/slave pair.
    pub fn new(master: Arc<M>, slave: Arc<S>, vocabulary: Arc<VocabularyMap>) -> Self {
        Self {
            master,
            slave,
            vocabulary,
        }
    }

    /// Runs one property pass.
    pub fn synchronize(&self) -> SyncResult<()> {
        let master_entries = self.master.get_all()?;
        let slave_entries = self.slave.get_all()?;

        let master_by_id: BTreeMap<&str, &SyncEntry> = master_entries
            .iter()
            .map(|e| (e.id.as_str(), e))
            .collect();

        let mut matched: Vec<&SyncEntry> = Vec::new();
        for entry in &slave_entries {
            self.vocabulary
                .mapped_value(EndpointRole::Slave, &entry.status)?;
            if master_by_id.contains_key(entry.id.as_str()) {
                matched.push(entry);
            }
        }

        let mut written = 0u64;
        for slave_entry in matched {
            let master_entry = master_by_id[slave_entry.id.as_str()];
            let status = self
                .vocabulary
                .mapped_value(EndpointRole::Master, &master_entry.status)?;
            let update = SyncEntry::new(
                master_entry.id.clone(),
                status,
                master_entry.properties.clone(),
            );
            self.slave.update_properties(&update)?;
            written += 1;
        }

        info!(written, "property pass complete");
        Ok(())
    }
}
