//! Keeps slave statuses consistent with the master, under translation.

use std::collections::BTreeMap;
use std::sync::Arc;
use tandem_core::{EndpointRole, SyncEndpoint, SyncEntry, SyncResult, VocabularyMap};
use tracing::{debug, info};

/// Pushes the master's status into slave entries whose translated status
/// diverges.
///
/// Every slave status is translated into the master's vocabulary up
/// front, with no existence pre-check: a slave status with no reverse
/// mapping aborts the whole pass with `MappingNotFound`. Unlike the
/// membership case, an untranslatable status here indicates a
/// misconfigured vocabulary rather than an entry that is not
/// representable yet.
///
/// Ids present on only one side are skipped; membership mismatches belong
/// to [`MembershipReconciler`](crate::MembershipReconciler).
pub struct StatusReconciler<M: SyncEndpoint, S: SyncEndpoint> {
    master: Arc<M>,
    slave: Arc<S>,
    vocabulary: Arc<VocabularyMap>,
}

impl<M: SyncEndpoint, S: SyncEndpoint> StatusReconciler<M, S> {
    /// Creates a reconciler over a master/slave pair.
    pub fn new(master: Arc<M>, slave: Arc<S>, vocabulary: Arc<VocabularyMap>) -> Self {
        Self {
            master,
            slave,
            vocabulary,
        }
    }

    /// Runs one status pass.
    pub fn synchronize(&self) -> SyncResult<()> {
        let master_entries = self.master.get_all()?;
        let slave_entries = self.slave.get_all()?;

        let master_by_id: BTreeMap<&str, &SyncEntry> = master_entries
            .iter()
            .map(|e| (e.id.as_str(), e))
            .collect();

        // Translate every slave status before touching anything, so a
        // misconfigured vocabulary fails the pass before any write.
        let mut translated_by_id: BTreeMap<&str, &str> = BTreeMap::new();
        for entry in &slave_entries {
            let translated = self
                .vocabulary
                .mapped_value(EndpointRole::Slave, &entry.status)?;
            translated_by_id.insert(entry.id.as_str(), translated);
        }

        let mut updated = 0u64;
        for (id, translated) in &translated_by_id {
            let Some(master_entry) = master_by_id.get(id) else {
                continue;
            };
            if *translated == master_entry.status {
                continue;
            }

            let target = self
                .vocabulary
                .mapped_value(EndpointRole::Master, &master_entry.status)?;
            debug!(id = %id, from = %translated, to = %master_entry.status, "status diverged");
            let update = SyncEntry::new(
                master_entry.id.clone(),
                target,
                master_entry.properties.clone(),
            );
            self.slave.update_status(&update)?;
            updated += 1;
        }

        info!(updated, "status pass complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_core::{EndpointCall, MemoryEndpoint, SyncError};

    fn entry(id: &str, status: &str) -> SyncEntry {
        SyncEntry::new(id, status, BTreeMap::new())
    }

    fn vocabulary() -> Arc<VocabularyMap> {
        let mut map = VocabularyMap::new();
        map.add_reciprocal("A", "X").unwrap();
        map.add_reciprocal("B", "Y").unwrap();
        Arc::new(map)
    }

    #[test]
    fn divergent_status_is_retranslated() {
        let master = Arc::new(MemoryEndpoint::with_entries([entry("1", "A")]));
        let slave = Arc::new(MemoryEndpoint::with_entries([entry("1", "Y")]));

        StatusReconciler::new(Arc::clone(&master), Arc::clone(&slave), vocabulary())
            .synchronize()
            .unwrap();

        assert_eq!(slave.entry("1").unwrap().status, "X");
    }

    #[test]
    fn matching_status_is_left_alone() {
        let master = Arc::new(MemoryEndpoint::with_entries([entry("1", "A")]));
        let slave = Arc::new(MemoryEndpoint::with_entries([entry("1", "X")]));

        StatusReconciler::new(Arc::clone(&master), Arc::clone(&slave), vocabulary())
            .synchronize()
            .unwrap();

        assert_eq!(slave.calls(), vec![EndpointCall::GetAll]);
    }

    #[test]
    fn second_pass_issues_no_updates() {
        let master = Arc::new(MemoryEndpoint::with_entries([entry("1", "A")]));
        let slave = Arc::new(MemoryEndpoint::with_entries([entry("1", "Y")]));
        let reconciler =
            StatusReconciler::new(Arc::clone(&master), Arc::clone(&slave), vocabulary());

        reconciler.synchronize().unwrap();
        slave.clear_calls();

        reconciler.synchronize().unwrap();
        assert_eq!(slave.calls(), vec![EndpointCall::GetAll]);
    }

    #[test]
    fn one_sided_ids_are_skipped() {
        let master = Arc::new(MemoryEndpoint::with_entries([
            entry("1", "A"),
            entry("master-only", "B"),
        ]));
        let slave = Arc::new(MemoryEndpoint::with_entries([
            entry("1", "X"),
            entry("slave-only", "Y"),
        ]));

        StatusReconciler::new(Arc::clone(&master), Arc::clone(&slave), vocabulary())
            .synchronize()
            .unwrap();

        assert_eq!(slave.calls(), vec![EndpointCall::GetAll]);
        assert_eq!(slave.entry("slave-only").unwrap().status, "Y");
    }

    #[test]
    fn untranslatable_slave_status_fails_the_pass() {
        let master = Arc::new(MemoryEndpoint::with_entries([entry("1", "A")]));
        let slave = Arc::new(MemoryEndpoint::with_entries([
            entry("1", "Y"),
            entry("2", "Limbo"),
        ]));

        let err = StatusReconciler::new(Arc::clone(&master), Arc::clone(&slave), vocabulary())
            .synchronize()
            .unwrap_err();
        assert_eq!(
            err,
            SyncError::MappingNotFound {
                role: EndpointRole::Slave,
                status: "Limbo".into(),
            }
        );
        // The pass failed before any write.
        assert_eq!(slave.calls(), vec![EndpointCall::GetAll]);
    }

    #[test]
    fn update_carries_master_properties() {
        let mut properties = BTreeMap::new();
        properties.insert("owner".to_string(), "ada".to_string());
        let master = Arc::new(MemoryEndpoint::with_entries([SyncEntry::new(
            "1",
            "A",
            properties.clone(),
        )]));
        let slave = Arc::new(MemoryEndpoint::with_entries([entry("1", "Y")]));

        StatusReconciler::new(Arc::clone(&master), Arc::clone(&slave), vocabulary())
            .synchronize()
            .unwrap();

        // The endpoint applies only the status; the submitted snapshot
        // still carries the master's properties per the contract.
        assert_eq!(slave.calls().last(), Some(&EndpointCall::UpdateStatus("1".into())));
        assert_eq!(slave.entry("1").unwrap().status, "X");
    }
}
