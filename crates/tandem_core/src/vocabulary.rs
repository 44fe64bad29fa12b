//! Bidirectional status-code translation between two endpoint vocabularies.

use crate::error::{SyncError, SyncResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The role an endpoint plays within one reconciliation pair.
///
/// Roles are explicit tags rather than endpoint references, so vocabulary
/// lookups never depend on object identity or hashing of endpoint values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointRole {
    /// Authoritative for membership and desired status/properties.
    Master,
    /// The endpoint being brought into alignment.
    Slave,
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointRole::Master => f.write_str("master"),
            EndpointRole::Slave => f.write_str("slave"),
        }
    }
}

/// A per-pair translation table between two status vocabularies.
///
/// The map holds one directional table per role; each table translates a
/// status local to that role into the partner's vocabulary. A local status
/// with no entry in its table means "do not propagate this state" —
/// whether that is an error depends on the caller (see
/// [`contains_key`](VocabularyMap::contains_key) versus
/// [`mapped_value`](VocabularyMap::mapped_value)).
///
/// Codes must match exactly; no case folding or trimming is applied.
/// Maps are built once, before any reconciler runs, and are read-only
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct VocabularyMap {
    master_to_slave: BTreeMap<String, String>,
    slave_to_master: BTreeMap<String, String>,
}

impl VocabularyMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a reciprocal pair: master status ↔ slave status.
    ///
    /// Fails with [`SyncError::DuplicateMapping`] if either direction is
    /// already registered; nothing is inserted in that case.
    pub fn add_reciprocal(
        &mut self,
        master_status: impl Into<String>,
        slave_status: impl Into<String>,
    ) -> SyncResult<()> {
        let master_status = master_status.into();
        let slave_status = slave_status.into();

        if self.master_to_slave.contains_key(&master_status) {
            return Err(SyncError::DuplicateMapping {
                role: EndpointRole::Master,
                status: master_status,
            });
        }
        if self.slave_to_master.contains_key(&slave_status) {
            return Err(SyncError::DuplicateMapping {
                role: EndpointRole::Slave,
                status: slave_status,
            });
        }

        self.master_to_slave
            .insert(master_status.clone(), slave_status.clone());
        self.slave_to_master.insert(slave_status, master_status);
        Ok(())
    }

    /// Registers a master→slave translation only.
    ///
    /// The slave status gains no reverse entry, making the vocabularies
    /// intentionally asymmetric.
    pub fn add_forward(
        &mut self,
        master_status: impl Into<String>,
        slave_status: impl Into<String>,
    ) -> SyncResult<()> {
        Self::insert_unique(
            &mut self.master_to_slave,
            EndpointRole::Master,
            master_status.into(),
            slave_status.into(),
        )
    }

    /// Registers a slave→master translation only.
    pub fn add_reverse(
        &mut self,
        slave_status: impl Into<String>,
        master_status: impl Into<String>,
    ) -> SyncResult<()> {
        Self::insert_unique(
            &mut self.slave_to_master,
            EndpointRole::Slave,
            slave_status.into(),
            master_status.into(),
        )
    }

    /// Translates a status local to `role` into the partner's vocabulary.
    ///
    /// This is the single failure point for translation: absent codes fail
    /// with [`SyncError::MappingNotFound`]. Callers for whom absence is
    /// expected should pre-check with
    /// [`contains_key`](VocabularyMap::contains_key).
    pub fn mapped_value(&self, role: EndpointRole, status: &str) -> SyncResult<&str> {
        self.table(role)
            .get(status)
            .map(String::as_str)
            .ok_or_else(|| SyncError::MappingNotFound {
                role,
                status: status.to_string(),
            })
    }

    /// Returns true if `status` has a translation in `role`'s table.
    pub fn contains_key(&self, role: EndpointRole, status: &str) -> bool {
        self.table(role).contains_key(status)
    }

    /// Lists the registered local vocabulary for `role`.
    pub fn keys(&self, role: EndpointRole) -> impl Iterator<Item = &str> {
        self.table(role).keys().map(String::as_str)
    }

    fn table(&self, role: EndpointRole) -> &BTreeMap<String, String> {
        match role {
            EndpointRole::Master => &self.master_to_slave,
            EndpointRole::Slave => &self.slave_to_master,
        }
    }

    fn insert_unique(
        table: &mut BTreeMap<String, String>,
        role: EndpointRole,
        local: String,
        partner: String,
    ) -> SyncResult<()> {
        if table.contains_key(&local) {
            return Err(SyncError::DuplicateMapping {
                role,
                status: local,
            });
        }
        table.insert(local, partner);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reciprocal_translates_both_directions() {
        let mut map = VocabularyMap::new();
        map.add_reciprocal("Open", "To Do").unwrap();
        map.add_reciprocal("Closed", "Done").unwrap();

        assert_eq!(map.mapped_value(EndpointRole::Master, "Open").unwrap(), "To Do");
        assert_eq!(map.mapped_value(EndpointRole::Slave, "Done").unwrap(), "Closed");
    }

    #[test]
    fn missing_value_fails() {
        let map = VocabularyMap::new();
        let err = map.mapped_value(EndpointRole::Master, "Open").unwrap_err();
        assert_eq!(
            err,
            SyncError::MappingNotFound {
                role: EndpointRole::Master,
                status: "Open".into(),
            }
        );
    }

    #[test]
    fn duplicate_registration_fails_without_overwriting() {
        let mut map = VocabularyMap::new();
        map.add_reciprocal("Open", "To Do").unwrap();

        let err = map.add_reciprocal("Open", "Backlog").unwrap_err();
        assert!(matches!(err, SyncError::DuplicateMapping { .. }));

        // The earlier entry survives.
        assert_eq!(map.mapped_value(EndpointRole::Master, "Open").unwrap(), "To Do");
    }

    #[test]
    fn reciprocal_rejects_duplicate_slave_side() {
        let mut map = VocabularyMap::new();
        map.add_reciprocal("Open", "To Do").unwrap();

        let err = map.add_reciprocal("Reopened", "To Do").unwrap_err();
        assert_eq!(
            err,
            SyncError::DuplicateMapping {
                role: EndpointRole::Slave,
                status: "To Do".into(),
            }
        );
        // Neither table gained a partial entry.
        assert!(!map.contains_key(EndpointRole::Master, "Reopened"));
    }

    #[test]
    fn forward_only_entry_is_asymmetric() {
        let mut map = VocabularyMap::new();
        map.add_forward("Archived", "Done").unwrap();

        assert_eq!(map.mapped_value(EndpointRole::Master, "Archived").unwrap(), "Done");
        assert!(!map.contains_key(EndpointRole::Slave, "Done"));
    }

    #[test]
    fn reverse_only_entry_is_asymmetric() {
        let mut map = VocabularyMap::new();
        map.add_reverse("Blocked", "On Hold").unwrap();

        assert_eq!(map.mapped_value(EndpointRole::Slave, "Blocked").unwrap(), "On Hold");
        assert!(!map.contains_key(EndpointRole::Master, "On Hold"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut map = VocabularyMap::new();
        map.add_reciprocal("Open", "To Do").unwrap();

        assert!(map.mapped_value(EndpointRole::Master, "open").is_err());
        assert!(map.mapped_value(EndpointRole::Master, "Open ").is_err());
    }

    #[test]
    fn keys_lists_local_vocabulary() {
        let mut map = VocabularyMap::new();
        map.add_reciprocal("Open", "To Do").unwrap();
        map.add_forward("Archived", "Done").unwrap();

        let master: Vec<_> = map.keys(EndpointRole::Master).collect();
        assert_eq!(master, vec!["Archived", "Open"]);

        let slave: Vec<_> = map.keys(EndpointRole::Slave).collect();
        assert_eq!(slave, vec!["To Do"]);
    }

    proptest! {
        #[test]
        fn reciprocal_pairs_round_trip(pairs in proptest::collection::btree_map(
            "[A-Za-z ]{1,12}",
            "[0-9a-z_]{1,12}",
            0..16,
        )) {
            // Values must be unique on the slave side too for reciprocal
            // registration to succeed; a BTreeMap only deduplicates keys.
            let mut seen = std::collections::BTreeSet::new();
            let pairs: Vec<_> = pairs
                .into_iter()
                .filter(|(_, v)| seen.insert(v.clone()))
                .collect();

            let mut map = VocabularyMap::new();
            for (master, slave) in &pairs {
                map.add_reciprocal(master.clone(), slave.clone()).unwrap();
            }

            for (master, slave) in &pairs {
                prop_assert_eq!(
                    map.mapped_value(EndpointRole::Master, master).unwrap(),
                    slave.as_str()
                );
                prop_assert_eq!(
                    map.mapped_value(EndpointRole::Slave, slave).unwrap(),
                    master.as_str()
                );
            }
            prop_assert_eq!(map.keys(EndpointRole::Master).count(), pairs.len());
            prop_assert_eq!(map.keys(EndpointRole::Slave).count(), pairs.len());
        }
    }
}
