//! Deterministic model compilation.
//!
//! The compiler rewrites a client's working (ESD) document into a canonical
//! snapshot versioned `baseline.version + 1`. Every sub-model is rebuilt
//! entirely from the current working state; nothing is merged with the
//! baseline (full-replacement policy).
//!
//! Determinism contract:
//! - all id allocation lives on an `IdentifierMapper` owned by the compile call
//! - keyed tables are `BTreeMap`, so emission order is stable
//! - no system time reads, no randomness, no environment reads
//!
//! Failure contract: compilation is all-or-nothing. A dangling reference
//! (`ReferenceNotFound`) or malformed input (`ValidationError`) aborts the
//! whole compile; no partial snapshot and no side-table mutation is visible
//! after a failed call.

use std::collections::BTreeMap;

use crate::errors::{SimlinkError, SimlinkResult};
use crate::mapper::IdentifierMapper;
use crate::model::device::{DeviceModel, DeviceTable};
use crate::model::esd::{EsdDocument, FunctionalBlock, KeyComponent, SoftwareComponent};
use crate::model::library::LibraryTable;
use crate::model::sdm::{
    FunctionalModel, HardwareComponent, HardwareModel, SmConnection, SmEndpoint,
    SmFunctionalBlock, SmPort, SmSoftwareComponent, SoftwareModel, SystemSnapshot,
};
use crate::model::validate;

/// A structured diagnostic emitted during compilation.
///
/// Diagnostics report non-fatal findings (synthesized placeholders, unresolved
/// library names); fatal conditions are errors, never diagnostics.
#[derive(Debug, Clone)]
pub struct CompileDiagnostic {
    pub level: DiagnosticLevel,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Info,
    Warning,
}

/// Counts for presentation and assertions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileStats {
    pub functional_blocks: usize,
    pub connections: usize,
    pub hardware_models: usize,
    pub software_models: usize,
    pub device_models: usize,
    pub mapped_ids: usize,
}

/// A compile result: the candidate snapshot plus diagnostics and stats.
#[derive(Debug, Clone)]
pub struct CompileReport {
    pub snapshot: SystemSnapshot,
    pub diagnostics: Vec<CompileDiagnostic>,
    pub stats: CompileStats,
}

/// Compiles a working document into a canonical snapshot for one client.
#[derive(Debug)]
pub struct ModelCompiler {
    client_id: String,
}

impl ModelCompiler {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Build a new snapshot versioned `baseline.version + 1`.
    ///
    /// `devices` is the client's accumulated device-model table; placeholder
    /// synthesis may extend it, and the extension is committed only when the
    /// whole compile succeeds. `libraries` is read-only.
    pub fn compile(
        &self,
        working: &EsdDocument,
        devices: &mut DeviceTable,
        libraries: &LibraryTable,
        baseline: &SystemSnapshot,
    ) -> SimlinkResult<CompileReport> {
        validate::esd_document(working)?;

        let mut mapper = IdentifierMapper::new(&self.client_id);
        let mut diagnostics = Vec::new();

        // Work on a scratch copy of the device table so a failed compile
        // leaves the caller's table untouched.
        let mut device_table = devices.clone();

        // Step 1: the candidate replaces the baseline wholesale; only the
        // snapshot identity is re-mapped, nothing else is carried over.
        let snapshot_id = mapper.map_id(&baseline.id);

        // Step 2: functional sub-model, indexing owned components for later
        // resolution.
        let mut block_index: BTreeMap<&str, &FunctionalBlock> = BTreeMap::new();
        let mut kc_index: BTreeMap<&str, &KeyComponent> = BTreeMap::new();
        let mut sc_index: BTreeMap<&str, &SoftwareComponent> = BTreeMap::new();

        let mut functional = FunctionalModel {
            id: mapper.map_id(&working.id),
            functional_blocks: Vec::with_capacity(working.functional_blocks.len()),
            connections: Vec::with_capacity(working.connections.len()),
        };

        for fb in &working.functional_blocks {
            block_index.insert(fb.id.as_str(), fb);

            let ports = fb
                .ports
                .iter()
                .map(|p| {
                    mapper.map_entity(SmPort {
                        id: p.id.clone(),
                        name: p.name.clone(),
                        parameters: p.parameters.clone(),
                        provenance: Vec::new(),
                    })
                })
                .collect();

            let key_components = fb
                .key_components
                .iter()
                .map(|kc| {
                    kc_index.insert(kc.id.as_str(), kc);
                    mapper.map_id(&kc.id)
                })
                .collect();

            for sc in &fb.software_components {
                sc_index.insert(sc.id.as_str(), sc);
            }

            functional.functional_blocks.push(mapper.map_entity(SmFunctionalBlock {
                id: fb.id.clone(),
                name: fb.name.clone(),
                ports,
                key_components,
                provenance: Vec::new(),
            }));
        }

        // Step 3: connections. Endpoints may only reference blocks and ports
        // already mapped above; an unseen id is a referential failure, not a
        // silent drop.
        for con in &working.connections {
            let mut endpoints = Vec::with_capacity(con.endpoints.len());
            for ep in &con.endpoints {
                let functional_block = mapper
                    .lookup(&ep.functional_block_id)
                    .ok_or_else(|| {
                        SimlinkError::reference_not_found(
                            "functional block",
                            &ep.functional_block_id,
                        )
                    })?
                    .to_string();
                let port = mapper
                    .lookup(&ep.port_id)
                    .ok_or_else(|| SimlinkError::reference_not_found("port", &ep.port_id))?
                    .to_string();
                endpoints.push(SmEndpoint {
                    functional_block,
                    port,
                });
            }
            functional.connections.push(mapper.map_entity(SmConnection {
                id: con.id.clone(),
                endpoints,
                provenance: Vec::new(),
            }));
        }

        // Step 4: hardware sub-models, one per project, with a component entry
        // synthesized for every key component of every assigned block.
        let mut hardware_models = Vec::with_capacity(working.hardware_projects.len());
        for hp in &working.hardware_projects {
            let mut functional_blocks = Vec::with_capacity(hp.functional_blocks.len());
            let mut components = Vec::new();
            for fb_id in &hp.functional_blocks {
                let fb = block_index.get(fb_id.as_str()).copied().ok_or_else(|| {
                    SimlinkError::reference_not_found("functional block", fb_id)
                })?;
                functional_blocks.push(mapper.map_id(&fb.id));
                for kc in &fb.key_components {
                    let device_model = device_table.get(&kc.id).map(|dm| mapper.map_id(&dm.id));
                    components.push(HardwareComponent {
                        id: mapper.map_id(&kc.id),
                        name: kc.name.clone(),
                        device_model,
                    });
                }
            }
            hardware_models.push(mapper.map_entity(HardwareModel {
                id: hp.id.clone(),
                implemented_by: hp.implemented_by.clone(),
                functional_blocks,
                components,
                provenance: Vec::new(),
            }));
        }

        // Step 5: software sub-models. Components resolve against the index
        // from step 2; the first component's parent key component determines
        // the hosting device, synthesizing a placeholder when none is
        // configured yet. The default-fill is compiler policy, not an error.
        let mut software_models = Vec::with_capacity(working.software_projects.len());
        for sp in &working.software_projects {
            let mut resolved = Vec::with_capacity(sp.software_components.len());
            let mut components = Vec::with_capacity(sp.software_components.len());
            for sc_id in &sp.software_components {
                let sc = sc_index.get(sc_id.as_str()).copied().ok_or_else(|| {
                    SimlinkError::reference_not_found("software component", sc_id)
                })?;
                resolved.push(sc);
                components.push(SmSoftwareComponent {
                    id: mapper.map_id(&sc.id),
                    name: sc.name.clone(),
                    library: libraries.get(&sc.name).cloned(),
                });
            }

            let mut device_model = None;
            if let Some(first) = resolved.first() {
                let kc_id = first.parent_key_component_id.as_str();
                let kc = kc_index.get(kc_id).copied().ok_or_else(|| {
                    SimlinkError::reference_not_found("key component", kc_id)
                })?;
                if !device_table.contains_key(kc_id) {
                    let placeholder = DeviceModel::placeholder(
                        format!("dm-{}", device_table.len() + 1),
                        kc.name.clone(),
                    );
                    diagnostics.push(CompileDiagnostic {
                        level: DiagnosticLevel::Warning,
                        code: "device.placeholder".to_string(),
                        message: format!(
                            "no device configured for key component {kc_id}; synthesized placeholder {} ({})",
                            placeholder.id, placeholder.device_mpn
                        ),
                    });
                    device_table.insert(kc_id.to_string(), placeholder);
                }
                device_model = device_table.get(kc_id).map(|dm| mapper.map_id(&dm.id));
            }

            software_models.push(mapper.map_entity(SoftwareModel {
                id: sp.id.clone(),
                implemented_by: sp.implemented_by.clone(),
                components,
                device_model,
                provenance: Vec::new(),
            }));
        }

        // Step 6: emit the full, possibly extended, device table.
        let device_models: Vec<DeviceModel> = device_table
            .values()
            .map(|dm| mapper.map_entity(dm.clone()))
            .collect();

        // Step 7: assemble. All steps completed; commit the extended device
        // table back to the caller.
        let stats = CompileStats {
            functional_blocks: functional.functional_blocks.len(),
            connections: functional.connections.len(),
            hardware_models: hardware_models.len(),
            software_models: software_models.len(),
            device_models: device_models.len(),
            mapped_ids: mapper.mapped(),
        };

        *devices = device_table;

        Ok(CompileReport {
            snapshot: SystemSnapshot {
                id: snapshot_id,
                version: baseline.version + 1,
                functional_model: Some(functional),
                hardware_models,
                software_models,
                device_models,
            },
            diagnostics,
            stats,
        })
    }
}
