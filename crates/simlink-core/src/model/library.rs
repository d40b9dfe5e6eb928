//! Software library metadata.
//!
//! Library items describe external packages (vendor, ecosystem, package name,
//! category) registered under a logical name. During compile, each software
//! component looks its own name up in the table; a hit attaches the metadata
//! to the compiled component, a miss simply leaves it off.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Library items registered by one client, keyed by logical name.
pub type LibraryTable = BTreeMap<String, SoftwareLibraryItem>;

/// External package metadata for a software component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareLibraryItem {
    pub name: String,
    pub vendor: String,
    pub ecosystem: String,
    pub package_name: String,
    pub category: String,
}
