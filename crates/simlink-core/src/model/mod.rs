//! Simlink data models.
//!
//! This module defines the strongly-typed representations for both sides of a
//! compile:
//!
//! - `esd`: a client's private working model, expressed with locally-scoped
//!   ids. Created and mutated only by the owning client; the compiler reads it
//!   and never mutates it.
//! - `sdm`: the canonical System Data Model snapshot produced by the compiler,
//!   with globally mapped ids and per-entity provenance. Immutable once
//!   published.
//! - `device`: resolved device peripheral/pin configurations supplied by the
//!   external device-configuration collaborator.
//! - `library`: external software package metadata keyed by logical name.
//!
//! Design goals:
//! - **Deterministic serialization:** field names follow the external snapshot
//!   schema (camelCase); keyed tables use `BTreeMap` so iteration order is
//!   stable. Canonical bytes for digests come from `crate::canonical`.
//! - **Minimal policy:** models are mostly "dumb" data. The compiler applies
//!   mapping, reference resolution, and synthesis policies.

pub mod device;
pub mod esd;
pub mod library;
pub mod sdm;

/// Structural validation for working-model inputs.
///
/// These checks cover the `ValidationError` conditions: required fields that
/// must be present before a compile may proceed. Reference resolution is not
/// done here; the compiler reports dangling ids as `ReferenceNotFound` while
/// it builds the snapshot.
pub mod validate {
    use std::collections::BTreeSet;

    use super::esd::EsdDocument;
    use crate::errors::{SimlinkError, SimlinkResult};

    /// Validate structural invariants of a working document.
    ///
    /// Checks:
    /// - the document and every entity carry a non-empty id
    /// - functional block and component names are non-empty
    /// - entity ids are unique within the document
    /// - every connection has exactly two endpoints with non-empty references
    /// - every software component names its parent key component
    pub fn esd_document(doc: &EsdDocument) -> SimlinkResult<()> {
        if doc.id.trim().is_empty() {
            return Err(SimlinkError::validation("document id is empty"));
        }

        let mut seen = BTreeSet::new();
        let mut unique = |id: &str, what: &str| -> SimlinkResult<()> {
            if id.trim().is_empty() {
                return Err(SimlinkError::validation(format!("{what} id is empty")));
            }
            if !seen.insert(id.to_string()) {
                return Err(SimlinkError::validation(format!(
                    "duplicate {what} id: {id}"
                )));
            }
            Ok(())
        };

        for fb in &doc.functional_blocks {
            unique(&fb.id, "functional block")?;
            if fb.name.trim().is_empty() {
                return Err(SimlinkError::validation(format!(
                    "functional block {} has an empty name",
                    fb.id
                )));
            }
            for port in &fb.ports {
                unique(&port.id, "port")?;
            }
            for kc in &fb.key_components {
                unique(&kc.id, "key component")?;
                if kc.name.trim().is_empty() {
                    return Err(SimlinkError::validation(format!(
                        "key component {} has an empty name",
                        kc.id
                    )));
                }
            }
            for sc in &fb.software_components {
                unique(&sc.id, "software component")?;
                if sc.parent_key_component_id.trim().is_empty() {
                    return Err(SimlinkError::validation(format!(
                        "software component {} does not name a parent key component",
                        sc.id
                    )));
                }
            }
        }

        for con in &doc.connections {
            unique(&con.id, "connection")?;
            if con.endpoints.len() != 2 {
                return Err(SimlinkError::validation(format!(
                    "connection {} must have exactly two endpoints, has {}",
                    con.id,
                    con.endpoints.len()
                )));
            }
            for ep in &con.endpoints {
                if ep.functional_block_id.trim().is_empty() || ep.port_id.trim().is_empty() {
                    return Err(SimlinkError::validation(format!(
                        "connection {} has an endpoint with empty references",
                        con.id
                    )));
                }
            }
        }

        for hp in &doc.hardware_projects {
            unique(&hp.id, "hardware project")?;
        }
        for sp in &doc.software_projects {
            unique(&sp.id, "software project")?;
        }

        Ok(())
    }

}
