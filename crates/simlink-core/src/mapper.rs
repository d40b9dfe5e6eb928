//! Stable identifier mapping for one compile session.
//!
//! An `IdentifierMapper` translates a client's locally-scoped ids into
//! canonical snapshot ids. Its lifetime spans exactly one compile call: the
//! counter and lookup table live on the mapper value, never in global state,
//! so a compile is reproducible and testable in isolation.
//!
//! Guarantees, per mapper instance:
//! - idempotent: mapping the same local id twice yields the same canonical id
//! - injective: distinct local ids never collapse onto one canonical id
//!
//! Cross-client id spaces are NOT disjoint by construction (every mapper's
//! counter restarts at zero); provenance records disambiguate origins.

use std::collections::BTreeMap;

use crate::model::sdm::{
    HardwareModel, ProvenanceParameter, ProvenanceRecord, SmConnection, SmFunctionalBlock, SmPort,
    SoftwareModel,
};
use crate::model::device::DeviceModel;

/// Provenance parameter key recording the original local id.
pub const PROVENANCE_LOCAL_ID: &str = "local-id";

/// An entity whose identity can be rewritten by the mapper.
///
/// Implementors return a copy of themselves with the canonical id installed
/// and provenance attached; the original local value is never mutated in
/// place.
pub trait Remappable {
    fn local_id(&self) -> &str;
    fn with_identity(self, canonical_id: String, provenance: Vec<ProvenanceRecord>) -> Self;
}

/// Maps locally-scoped ids to canonical ids for one compiling client.
#[derive(Debug)]
pub struct IdentifierMapper {
    client_id: String,
    next: u64,
    assigned: BTreeMap<String, String>,
}

impl IdentifierMapper {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            next: 0,
            assigned: BTreeMap::new(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Map a local id to its canonical id, allocating on first sight.
    pub fn map_id(&mut self, local: &str) -> String {
        if let Some(canonical) = self.assigned.get(local) {
            return canonical.clone();
        }
        self.next += 1;
        let canonical = format!("cid-{}", self.next);
        self.assigned.insert(local.to_string(), canonical.clone());
        canonical
    }

    /// Resolve a local id that must already have been mapped.
    ///
    /// Used for cross-references (connection endpoints) that may only point
    /// at entities built earlier in the same compile; never allocates.
    pub fn lookup(&self, local: &str) -> Option<&str> {
        self.assigned.get(local).map(|s| s.as_str())
    }

    /// Number of distinct local ids mapped so far.
    pub fn mapped(&self) -> usize {
        self.assigned.len()
    }

    /// Provenance recording the compiling client and the original local id.
    pub fn provenance_for(&self, local: &str) -> Vec<ProvenanceRecord> {
        vec![ProvenanceRecord {
            client_id: self.client_id.clone(),
            parameters: vec![ProvenanceParameter {
                id: PROVENANCE_LOCAL_ID.to_string(),
                value: local.to_string(),
            }],
        }]
    }

    /// Return a copy of the entity with its id mapped and provenance attached.
    pub fn map_entity<T: Remappable>(&mut self, entity: T) -> T {
        let local = entity.local_id().to_string();
        let canonical = self.map_id(&local);
        let provenance = self.provenance_for(&local);
        entity.with_identity(canonical, provenance)
    }
}

macro_rules! impl_remappable {
    ($($ty:ty),+ $(,)?) => {
        $(impl Remappable for $ty {
            fn local_id(&self) -> &str {
                &self.id
            }
            fn with_identity(
                mut self,
                canonical_id: String,
                provenance: Vec<ProvenanceRecord>,
            ) -> Self {
                self.id = canonical_id;
                self.provenance = provenance;
                self
            }
        })+
    };
}

impl_remappable!(
    SmFunctionalBlock,
    SmPort,
    SmConnection,
    HardwareModel,
    SoftwareModel,
    DeviceModel,
);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn mapping_is_idempotent() {
        let mut m = IdentifierMapper::new("esd");
        let a = m.map_id("fb-1");
        let b = m.map_id("fb-1");
        assert_eq!(a, b);
        assert_eq!(m.mapped(), 1);
    }

    #[test]
    fn lookup_never_allocates() {
        let m = IdentifierMapper::new("esd");
        assert!(m.lookup("fb-1").is_none());
        assert_eq!(m.mapped(), 0);
    }

    #[test]
    fn provenance_names_client_and_local_id() {
        let mut m = IdentifierMapper::new("esd");
        m.map_id("port-3");
        let prov = m.provenance_for("port-3");
        assert_eq!(prov.len(), 1);
        assert_eq!(prov[0].client_id, "esd");
        assert_eq!(prov[0].parameters[0].id, PROVENANCE_LOCAL_ID);
        assert_eq!(prov[0].parameters[0].value, "port-3");
    }

    #[test]
    fn map_entity_rewrites_id_and_attaches_provenance() {
        let mut m = IdentifierMapper::new("esd");
        let block = SmFunctionalBlock {
            id: "fb-1".to_string(),
            name: "MCU".to_string(),
            ..SmFunctionalBlock::default()
        };
        let mapped = m.map_entity(block);
        assert_eq!(mapped.id, "cid-1");
        assert_eq!(mapped.provenance[0].parameters[0].value, "fb-1");
        // Mapping the same local id again stays stable.
        assert_eq!(m.map_id("fb-1"), "cid-1");
    }

    proptest! {
        #[test]
        fn map_id_idempotent(local in "[a-z]{1,12}-[0-9]{1,4}") {
            let mut m = IdentifierMapper::new("esd");
            let first = m.map_id(&local);
            let second = m.map_id(&local);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn map_id_injective(a in "[a-z]{1,12}", b in "[a-z]{1,12}") {
            prop_assume!(a != b);
            let mut m = IdentifierMapper::new("esd");
            let ca = m.map_id(&a);
            let cb = m.map_id(&b);
            prop_assert_ne!(ca, cb);
        }
    }
}
