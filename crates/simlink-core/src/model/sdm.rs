//! Canonical System Data Model (SDM) snapshot types.
//!
//! A `SystemSnapshot` is the unit published to and pulled from the shared
//! store. It is produced only by the compiler, carries globally mapped ids,
//! and is treated as an immutable value once published: clients hold copies,
//! never aliases.
//!
//! Field names follow the external snapshot schema (camelCase on the wire);
//! the serialized form must round-trip byte-for-byte, which is checked with
//! canonical digests in `crate::canonical`.

use serde::{Deserialize, Serialize};

use super::device::DeviceModel;
use super::esd::Parameter;
use super::library::SoftwareLibraryItem;

/// A compiled, canonically-identified snapshot of the whole system design.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSnapshot {
    pub id: String,
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functional_model: Option<FunctionalModel>,
    #[serde(default)]
    pub hardware_models: Vec<HardwareModel>,
    #[serde(default)]
    pub software_models: Vec<SoftwareModel>,
    #[serde(default)]
    pub device_models: Vec<DeviceModel>,
}

impl SystemSnapshot {
    /// The initial snapshot held by a store before any publish: version 0,
    /// no sub-models.
    pub fn empty() -> Self {
        Self {
            id: "sdm-0".to_string(),
            version: 0,
            functional_model: None,
            hardware_models: Vec::new(),
            software_models: Vec::new(),
            device_models: Vec::new(),
        }
    }
}

/// The functional sub-model: blocks and the connections between their ports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionalModel {
    pub id: String,
    #[serde(default)]
    pub functional_blocks: Vec<SmFunctionalBlock>,
    #[serde(default)]
    pub connections: Vec<SmConnection>,
}

/// A compiled functional block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmFunctionalBlock {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ports: Vec<SmPort>,
    /// Canonical ids of the key components owned by this block.
    #[serde(default)]
    pub key_components: Vec<String>,
    #[serde(default)]
    pub provenance: Vec<ProvenanceRecord>,
}

/// A compiled port.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmPort {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub provenance: Vec<ProvenanceRecord>,
}

/// A compiled connection; endpoints reference canonical block/port ids that
/// resolve within the same snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmConnection {
    pub id: String,
    #[serde(default)]
    pub endpoints: Vec<SmEndpoint>,
    #[serde(default)]
    pub provenance: Vec<ProvenanceRecord>,
}

/// One end of a compiled connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmEndpoint {
    pub functional_block: String,
    pub port: String,
}

/// A compiled hardware sub-model for one hardware project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareModel {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implemented_by: Option<String>,
    /// Canonical ids of the functional blocks assigned to this project.
    #[serde(default)]
    pub functional_blocks: Vec<String>,
    #[serde(default)]
    pub components: Vec<HardwareComponent>,
    #[serde(default)]
    pub provenance: Vec<ProvenanceRecord>,
}

/// A hardware component entry synthesized from a key component, linked to a
/// device model when one is configured.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareComponent {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
}

/// A compiled software sub-model for one software project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareModel {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implemented_by: Option<String>,
    #[serde(default)]
    pub components: Vec<SmSoftwareComponent>,
    /// Canonical id of the device model hosting this project's components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
    #[serde(default)]
    pub provenance: Vec<ProvenanceRecord>,
}

/// A compiled software component, with library metadata when the component
/// name resolves in the software-library table. Absence of library metadata
/// is not an error; the field is simply omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmSoftwareComponent {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<SoftwareLibraryItem>,
}

/// Provenance attached to each compiled entity: which client compiled it and
/// what its original local id was. Traceability only, never used for
/// reference resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvenanceRecord {
    pub client_id: String,
    pub parameters: Vec<ProvenanceParameter>,
}

/// A single provenance key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvenanceParameter {
    pub id: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_is_version_zero() {
        let s = SystemSnapshot::empty();
        assert_eq!(s.version, 0);
        assert!(s.functional_model.is_none());
        assert!(s.hardware_models.is_empty());
        assert!(s.software_models.is_empty());
        assert!(s.device_models.is_empty());
    }

    #[test]
    fn snapshot_wire_fields_are_camel_case() {
        let s = SystemSnapshot::empty();
        let v = serde_json::to_value(&s).unwrap();
        let obj = v.as_object().unwrap();
        assert!(obj.contains_key("hardwareModels"));
        assert!(obj.contains_key("softwareModels"));
        assert!(obj.contains_key("deviceModels"));
        assert!(!obj.contains_key("functionalModel"));
    }
}
