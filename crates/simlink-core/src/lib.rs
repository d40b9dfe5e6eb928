//! simlink-core
//!
//! Core primitives for Simlink:
//! - Working (ESD) and canonical (SDM) system-model types
//! - Identifier mapping with per-compile stability and provenance
//! - The deterministic model compiler (full-replacement policy)
//! - Canonical JSON encoding and snapshot digests
//!
//! The core crate performs no filesystem or network I/O and reads no system
//! time, environment, or randomness: every compile is a pure function of its
//! inputs plus the mapper owned by the call.

pub mod canonical;
pub mod compiler;
pub mod errors;
pub mod mapper;
pub mod model;
pub mod workspace;

pub use crate::errors::{SimlinkError, SimlinkResult};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::canonical::{canonical_json_bytes, snapshot_digest_hex};
    pub use crate::compiler::{CompileReport, CompileStats, ModelCompiler};
    pub use crate::mapper::{IdentifierMapper, Remappable};
    pub use crate::model::device::{DeviceModel, DeviceTable};
    pub use crate::model::esd::EsdDocument;
    pub use crate::model::library::{LibraryTable, SoftwareLibraryItem};
    pub use crate::model::sdm::SystemSnapshot;
    pub use crate::workspace::DesignWorkspace;
    pub use crate::{SimlinkError, SimlinkResult};
}
