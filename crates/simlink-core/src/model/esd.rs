//! Working (ESD) model types.
//!
//! An `EsdDocument` is one client's loosely-linked view of the design:
//! functional blocks that own ports and components, projects that claim
//! blocks/components by id, and connections between ports. All ids are
//! locally scoped to the owning client; the compiler translates them into
//! canonical ids when it builds a snapshot.
//!
//! Cross-references inside a working document are allowed to dangle while the
//! client edits; they are only enforced at compile time.

use serde::{Deserialize, Serialize};

/// A client's complete working model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsdDocument {
    pub id: String,
    #[serde(default)]
    pub functional_blocks: Vec<FunctionalBlock>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub hardware_projects: Vec<HardwareProject>,
    #[serde(default)]
    pub software_projects: Vec<SoftwareProject>,
}

impl EsdDocument {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// A functional block owning ports and hardware/software components.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionalBlock {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ports: Vec<Port>,
    #[serde(default)]
    pub key_components: Vec<KeyComponent>,
    #[serde(default)]
    pub software_components: Vec<SoftwareComponent>,
}

impl FunctionalBlock {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A port owned by exactly one functional block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// A typed name/value parameter attached to a port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

/// A connection between two ports, referenced by (block, port) id pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

/// One end of a connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub functional_block_id: String,
    pub port_id: String,
}

/// A hardware project claiming functional blocks by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareProject {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implemented_by: Option<String>,
    #[serde(default)]
    pub functional_blocks: Vec<String>,
}

/// A software project claiming software components by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareProject {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implemented_by: Option<String>,
    #[serde(default)]
    pub software_components: Vec<String>,
}

/// A key hardware component, named by manufacturer part number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyComponent {
    pub id: String,
    pub name: String,
}

/// A software component hosted on a key component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareComponent {
    pub id: String,
    pub name: String,
    pub parent_key_component_id: String,
}
