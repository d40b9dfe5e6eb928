//! Canonical encoding and digests for snapshots.
//!
//! The snapshot wire schema is an external contract the compiler must honor
//! byte-for-byte across a serialization round-trip. Canonical bytes are the
//! JSON encoding with lexicographically ordered object keys (serde_json's
//! `Value` maps are ordered, so re-encoding through `Value` sorts keys) and no
//! insignificant whitespace.
//!
//! Digests are SHA-256 over canonical bytes, lowercase hex. The store records
//! the digest of the currently published snapshot so clients can cheaply
//! compare what they hold against what is published.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::{SimlinkError, SimlinkResult};
use crate::model::sdm::SystemSnapshot;

/// Canonical JSON bytes of any serializable value.
pub fn canonical_json_bytes<T: Serialize>(value: &T) -> SimlinkResult<Vec<u8>> {
    let v = serde_json::to_value(value)
        .map_err(|e| SimlinkError::serialization(format!("failed to encode value: {e}")))?;
    serde_json::to_vec(&v)
        .map_err(|e| SimlinkError::serialization(format!("failed to encode canonical JSON: {e}")))
}

/// SHA-256 of canonical bytes, lowercase hex.
pub fn digest_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

/// Canonical digest of a snapshot.
pub fn snapshot_digest_hex(snapshot: &SystemSnapshot) -> SimlinkResult<String> {
    Ok(digest_hex(&canonical_json_bytes(snapshot)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable() {
        let s = SystemSnapshot::empty();
        let d1 = snapshot_digest_hex(&s).unwrap();
        let d2 = snapshot_digest_hex(&s).unwrap();
        assert_eq!(d1, d2);
        assert_eq!(d1.len(), 64);
    }

    #[test]
    fn digest_changes_with_content() {
        let a = SystemSnapshot::empty();
        let mut b = SystemSnapshot::empty();
        b.version = 1;
        assert_ne!(
            snapshot_digest_hex(&a).unwrap(),
            snapshot_digest_hex(&b).unwrap()
        );
    }

    #[test]
    fn round_trip_preserves_canonical_bytes() {
        let s = SystemSnapshot::empty();
        let bytes = canonical_json_bytes(&s).unwrap();
        let back: SystemSnapshot = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(bytes, canonical_json_bytes(&back).unwrap());
    }
}
