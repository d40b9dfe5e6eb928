//! A client's private design workspace.
//!
//! The workspace owns one working document plus the client's accumulated side
//! tables (device models keyed by key-component id, software libraries keyed
//! by logical name). Authoring helpers allocate document-unique local ids
//! (`fb-1`, `port-2`, ...); the ids stay local until a compile maps them.
//!
//! Two collaborator boundaries terminate here:
//! - `configure_device` accepts a fully resolved device model from the
//!   external device-configuration tool
//! - `add_software_library_item` registers external package metadata for
//!   lookup by component name during compile

use crate::compiler::{CompileReport, ModelCompiler};
use crate::errors::{SimlinkError, SimlinkResult};
use crate::model::device::{DeviceModel, DeviceTable};
use crate::model::esd::{
    Connection, Endpoint, EsdDocument, FunctionalBlock, HardwareProject, KeyComponent, Parameter,
    Port, SoftwareComponent, SoftwareProject,
};
use crate::model::library::{LibraryTable, SoftwareLibraryItem};
use crate::model::sdm::SystemSnapshot;

/// One client's working model and side tables.
#[derive(Debug, Default)]
pub struct DesignWorkspace {
    model: EsdDocument,
    devices: DeviceTable,
    libraries: LibraryTable,
    counters: IdCounters,
}

#[derive(Debug, Default)]
struct IdCounters {
    block: usize,
    port: usize,
    connection: usize,
    key_component: usize,
    software_component: usize,
    hardware_project: usize,
    software_project: usize,
}

impl DesignWorkspace {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            model: EsdDocument::new(document_id),
            ..Self::default()
        }
    }

    pub fn model(&self) -> &EsdDocument {
        &self.model
    }

    pub fn devices(&self) -> &DeviceTable {
        &self.devices
    }

    pub fn libraries(&self) -> &LibraryTable {
        &self.libraries
    }

    /// Compile the current working state against a baseline snapshot.
    pub fn compile(
        &mut self,
        compiler: &ModelCompiler,
        baseline: &SystemSnapshot,
    ) -> SimlinkResult<CompileReport> {
        compiler.compile(&self.model, &mut self.devices, &self.libraries, baseline)
    }

    /// Add a functional block, optionally assigning it to a hardware project.
    pub fn add_functional_block(
        &mut self,
        name: &str,
        hardware_project: Option<&str>,
    ) -> SimlinkResult<String> {
        self.counters.block += 1;
        let id = format!("fb-{}", self.counters.block);
        if let Some(hp_id) = hardware_project {
            let hp = self
                .model
                .hardware_projects
                .iter_mut()
                .find(|p| p.id == hp_id)
                .ok_or_else(|| SimlinkError::reference_not_found("hardware project", hp_id))?;
            hp.functional_blocks.push(id.clone());
        }
        self.model
            .functional_blocks
            .push(FunctionalBlock::new(id.clone(), name));
        Ok(id)
    }

    pub fn add_hardware_project(&mut self, implemented_by: Option<&str>) -> String {
        self.counters.hardware_project += 1;
        let id = format!("hp-{}", self.counters.hardware_project);
        self.model.hardware_projects.push(HardwareProject {
            id: id.clone(),
            implemented_by: implemented_by.map(str::to_string),
            functional_blocks: Vec::new(),
        });
        id
    }

    pub fn add_software_project(&mut self, implemented_by: Option<&str>) -> String {
        self.counters.software_project += 1;
        let id = format!("sp-{}", self.counters.software_project);
        self.model.software_projects.push(SoftwareProject {
            id: id.clone(),
            implemented_by: implemented_by.map(str::to_string),
            software_components: Vec::new(),
        });
        id
    }

    /// Add a port to a functional block.
    pub fn add_port(
        &mut self,
        block_id: &str,
        name: &str,
        parameters: Vec<Parameter>,
    ) -> SimlinkResult<String> {
        self.counters.port += 1;
        let id = format!("port-{}", self.counters.port);
        let block = self.block_mut(block_id)?;
        block.ports.push(Port {
            id: id.clone(),
            name: name.to_string(),
            parameters,
        });
        Ok(id)
    }

    /// Add a key component (by manufacturer part number) to a block.
    pub fn add_key_component(&mut self, block_id: &str, mpn: &str) -> SimlinkResult<String> {
        self.counters.key_component += 1;
        let id = format!("kc-{}", self.counters.key_component);
        let block = self.block_mut(block_id)?;
        block.key_components.push(KeyComponent {
            id: id.clone(),
            name: mpn.to_string(),
        });
        Ok(id)
    }

    /// Add a software component hosted on `parent_kc_id`, assigned to a
    /// software project.
    pub fn add_software_component(
        &mut self,
        block_id: &str,
        parent_kc_id: &str,
        name: &str,
        software_project: &str,
    ) -> SimlinkResult<String> {
        self.counters.software_component += 1;
        let id = format!("sc-{}", self.counters.software_component);
        let sp = self
            .model
            .software_projects
            .iter_mut()
            .find(|p| p.id == software_project)
            .ok_or_else(|| {
                SimlinkError::reference_not_found("software project", software_project)
            })?;
        sp.software_components.push(id.clone());
        let block = self.block_mut(block_id)?;
        block.software_components.push(SoftwareComponent {
            id: id.clone(),
            name: name.to_string(),
            parent_key_component_id: parent_kc_id.to_string(),
        });
        Ok(id)
    }

    /// Connect two ports. References are not checked here; the working model
    /// may dangle until compile time.
    pub fn add_connection(
        &mut self,
        src_block: &str,
        src_port: &str,
        dst_block: &str,
        dst_port: &str,
    ) -> String {
        self.counters.connection += 1;
        let id = format!("conn-{}", self.counters.connection);
        self.model.connections.push(Connection {
            id: id.clone(),
            endpoints: vec![
                Endpoint {
                    functional_block_id: src_block.to_string(),
                    port_id: src_port.to_string(),
                },
                Endpoint {
                    functional_block_id: dst_block.to_string(),
                    port_id: dst_port.to_string(),
                },
            ],
        });
        id
    }

    /// Collaborator boundary: accept a resolved device model for a key
    /// component from the external device-configuration tool.
    pub fn configure_device(&mut self, key_component_id: &str, device: DeviceModel) {
        self.devices.insert(key_component_id.to_string(), device);
    }

    /// Collaborator boundary: register external package metadata under a
    /// logical name.
    pub fn add_software_library_item(
        &mut self,
        name: &str,
        vendor: &str,
        ecosystem: &str,
        package_name: &str,
        category: &str,
    ) {
        self.libraries.insert(
            name.to_string(),
            SoftwareLibraryItem {
                name: name.to_string(),
                vendor: vendor.to_string(),
                ecosystem: ecosystem.to_string(),
                package_name: package_name.to_string(),
                category: category.to_string(),
            },
        );
    }

    fn block_mut(&mut self, block_id: &str) -> SimlinkResult<&mut FunctionalBlock> {
        self.model
            .functional_blocks
            .iter_mut()
            .find(|b| b.id == block_id)
            .ok_or_else(|| SimlinkError::reference_not_found("functional block", block_id))
    }
}
