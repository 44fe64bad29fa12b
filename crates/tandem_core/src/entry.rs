//! Workflow entries exchanged through the endpoint contract.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of one workflow entry as seen by one endpoint.
///
/// Entries are immutable values: "updating" an entry means constructing a
/// new `SyncEntry` and submitting it through a [`SyncEndpoint`]
/// operation. No shared mutable entry objects exist anywhere in the
/// system.
///
/// # Fields
///
/// - `id`: stable identity, opaque to the engine; the same id names the
///   same logical entry on both endpoints
/// - `status`: a status code in the *owning endpoint's* vocabulary
/// - `properties`: unordered string properties
/// - `sequence`: optional ordering hint
///
/// [`SyncEndpoint`]: crate::endpoint::SyncEndpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncEntry {
    /// Stable identity.
    pub id: String,
    /// Status code in the owning endpoint's vocabulary.
    pub status: String,
    /// String properties, unordered.
    pub properties: BTreeMap<String, String>,
    /// Optional ordering hint.
    pub sequence: Option<u64>,
}

impl SyncEntry {
    /// Creates an entry with no sequence number.
    pub fn new(
        id: impl Into<String>,
        status: impl Into<String>,
        properties: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
            properties,
            sequence: None,
        }
    }

    /// Sets the sequence number.
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Returns a copy of this entry with a different status.
    ///
    /// Used when re-expressing an entry in the partner endpoint's
    /// vocabulary; every other field is carried over unchanged.
    pub fn with_status(&self, status: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            status: status.into(),
            properties: self.properties.clone(),
            sequence: self.sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn structural_equality() {
        let a = SyncEntry::new("42", "Open", props(&[("owner", "ada")]));
        let b = SyncEntry::new("42", "Open", props(&[("owner", "ada")]));
        assert_eq!(a, b);

        assert_ne!(a, b.clone().with_sequence(7));
        assert_ne!(a, b.with_status("Closed"));
    }

    #[test]
    fn with_status_preserves_other_fields() {
        let entry = SyncEntry::new("42", "Open", props(&[("owner", "ada")])).with_sequence(3);
        let renamed = entry.with_status("Offen");

        assert_eq!(renamed.id, "42");
        assert_eq!(renamed.status, "Offen");
        assert_eq!(renamed.properties, entry.properties);
        assert_eq!(renamed.sequence, Some(3));
    }

    #[test]
    fn serializes_properties_as_object() {
        let entry = SyncEntry::new("42", "Open", props(&[("owner", "ada"), ("lane", "dev")]));
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["id"], "42");
        assert_eq!(json["status"], "Open");
        assert_eq!(json["properties"]["owner"], "ada");
        assert!(json["sequence"].is_null());
    }
}
