//! Error types for simlink-core.
//!
//! The compiler is all-or-nothing: any of these errors aborts a compile before
//! any sub-model of the candidate snapshot is emitted. None of them are retried
//! automatically; callers decide whether to fix inputs and recompile.

use thiserror::Error;

/// Errors produced by the model compiler and its supporting modules.
#[derive(Debug, Error)]
pub enum SimlinkError {
    /// A cross-reference did not resolve within the current compile.
    ///
    /// Dangling references are never dropped silently; the whole compile fails.
    #[error("reference not found: {kind} `{id}` does not resolve in this compile")]
    ReferenceNotFound { kind: String, id: String },

    /// A working-model input is malformed or incomplete.
    #[error("validation error: {0}")]
    Validation(String),

    /// Canonical encoding or digest computation failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SimlinkError {
    pub fn reference_not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::ReferenceNotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

/// Convenience result alias used throughout the crate.
pub type SimlinkResult<T> = Result<T, SimlinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_not_found_names_kind_and_id() {
        let e = SimlinkError::reference_not_found("port", "port-9");
        assert!(e.to_string().contains("port `port-9`"));
    }

    #[test]
    fn validation_message_preserved() {
        let e = SimlinkError::validation("functional block name is empty");
        assert!(e.to_string().contains("name is empty"));
    }
}
