//! Replicates master properties and sequence into existing slave entries.

use std::collections::BTreeMap;
use std::sync::Arc;
use tandem_core::{SyncEndpoint, SyncEntry, SyncResult};
use tracing::info;

/// Pushes the master's properties and sequence number into every slave
/// entry that already exists, without altering slave status.
///
/// Slave status is owned by the slave once an entry exists — it may have
/// progressed further than the translated master status — so the update
/// submitted here carries the slave's *current* status and the endpoint's
/// `update_data` contract leaves status untouched anyway. No vocabulary
/// lookup occurs in this pass.
///
/// This pass is not call-count idempotent: every matched id is written
/// every pass, though the resulting state is stable.
pub struct DataReconciler<M: SyncEndpoint, S: SyncEndpoint> {
    master: Arc<M>,
    slave: Arc<S>,
}

impl<M: SyncEndpoint, S: SyncEndpoint> DataReconciler<M, S> {
    /// Creates a reconciler over a master/slave pair.
    pub fn new(master: Arc<M>, slave: Arc<S>) -> Self {
        Self { master, slave }
    }

    /// Runs one data pass.
    pub fn synchronize(&self) -> SyncResult<()> {
        let master_entries = self.master.get_all()?;
        let slave_entries = self.slave.get_all()?;

        let master_by_id: BTreeMap<&str, &SyncEntry> = master_entries
            .iter()
            .map(|e| (e.id.as_str(), e))
            .collect();

        let mut written = 0u64;
        for slave_entry in &slave_entries {
            let Some(master_entry) = master_by_id.get(slave_entry.id.as_str()) else {
                continue;
            };

            let mut update = SyncEntry::new(
                slave_entry.id.clone(),
                slave_entry.status.clone(),
                master_entry.properties.clone(),
            );
            update.sequence = master_entry.sequence;
            self.slave.update_data(&update)?;
            written += 1;
        }

        info!(written, "data pass complete");
        Ok(())
    }
}
