//! Resolved device model types.
//!
//! A `DeviceModel` describes a configured device: its peripherals, peripheral
//! instances/modes, pin configurations, and physical ports. The contents are
//! produced by an external device-configuration tool; the compiler consumes
//! them as an opaque payload and never edits peripheral contents. The single
//! exception is placeholder synthesis: when a software project's parent key
//! component has no configured device yet, the compiler registers an empty
//! device model named after that component.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::sdm::ProvenanceRecord;

/// Device models accumulated by one client, keyed by owning key-component id.
pub type DeviceTable = BTreeMap<String, DeviceModel>;

/// A fully resolved device configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceModel {
    pub id: String,
    /// Device manufacturer part number.
    pub device_mpn: String,
    #[serde(default)]
    pub peripherals: Vec<Peripheral>,
    #[serde(default)]
    pub ports: Vec<DevicePort>,
    #[serde(default)]
    pub provenance: Vec<ProvenanceRecord>,
}

impl DeviceModel {
    /// A placeholder for a key component with no configured device yet:
    /// named after the component, empty peripheral and port lists.
    pub fn placeholder(id: impl Into<String>, device_mpn: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            device_mpn: device_mpn.into(),
            peripherals: Vec::new(),
            ports: Vec::new(),
            provenance: Vec::new(),
        }
    }

    /// True if this model carries no configured contents.
    pub fn is_placeholder(&self) -> bool {
        self.peripherals.is_empty() && self.ports.is_empty()
    }
}

/// A peripheral group (e.g. "Connectivity:SCI").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Peripheral {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub instances: Vec<PeripheralInstance>,
}

/// A concrete peripheral instance (e.g. "SCI9").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeripheralInstance {
    pub id: String,
    pub name: String,
    pub unit: String,
    #[serde(default)]
    pub modes: Vec<PeripheralMode>,
}

/// An operating mode of a peripheral instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeripheralMode {
    pub name: String,
    #[serde(default)]
    pub configurations: Vec<PeripheralConfiguration>,
}

/// A pin-level configuration option for a mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeripheralConfiguration {
    pub id: String,
    #[serde(default)]
    pub pin_configs: Vec<PinConfig>,
    #[serde(default)]
    pub pin_dependency_configs: Vec<PinDependencyConfig>,
}

/// A single pin assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinConfig {
    pub pin_name: String,
    pub pin_value: String,
    pub function: String,
    pub port_name: String,
}

/// A dependency between pin assignments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinDependencyConfig {
    pub name: String,
    pub value: String,
}

/// A physical port/pin on the device package.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePort {
    pub id: String,
    pub name: String,
    pub pin: String,
    #[serde(default)]
    pub functions: Vec<PortFunction>,
}

/// A selectable function of a physical port.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortFunction {
    pub name: String,
}
