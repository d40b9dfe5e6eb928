//! The shared model store.
//!
//! Exactly one published snapshot plus a monotonically increasing version
//! counter, shared by all clients. The version check and snapshot replacement
//! happen under one lock acquisition, so a conditional push is a single
//! compare-and-swap with no state observable in between.
//!
//! Pull never blocks on anything but the lock and never fails: before any
//! publish it returns the empty initial snapshot at version 0. Every pull
//! returns a disjoint copy; clients never hold aliases into the store.

use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;

use simlink_core::canonical::snapshot_digest_hex;
use simlink_core::model::sdm::SystemSnapshot;

/// Errors from conditional pushes.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store's version advanced past the pusher's baseline. The store is
    /// left completely unchanged; the client must re-pull.
    #[error("version conflict: store is at version {store_version}, push assumed baseline {baseline_version}")]
    VersionConflict {
        store_version: u64,
        baseline_version: u64,
    },

    /// The candidate snapshot is not a valid successor of the stated baseline.
    #[error("bad candidate snapshot: {0}")]
    BadCandidate(String),
}

/// Returned by a successful push.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushReceipt {
    /// The store version after the push (baseline + 1).
    pub version: u64,
    /// Canonical digest of the snapshot now published.
    pub digest_hex: String,
}

#[derive(Debug)]
struct StoreInner {
    snapshot: SystemSnapshot,
    version: u64,
    digest_hex: Option<String>,
}

/// Holds the single current canonical snapshot all clients synchronize
/// against.
#[derive(Debug)]
pub struct SharedModelStore {
    inner: Mutex<StoreInner>,
}

impl Default for SharedModelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedModelStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                snapshot: SystemSnapshot::empty(),
                version: 0,
                digest_hex: None,
            }),
        }
    }

    /// An isolated copy of the current snapshot.
    pub fn pull(&self) -> SystemSnapshot {
        self.inner.lock().snapshot.clone()
    }

    /// The current version counter.
    pub fn version(&self) -> u64 {
        self.inner.lock().version
    }

    /// Canonical digest of the published snapshot; `None` before any publish.
    pub fn digest_hex(&self) -> Option<String> {
        self.inner.lock().digest_hex.clone()
    }

    /// Conditionally replace the stored snapshot.
    ///
    /// Succeeds only if `known_baseline_version` still equals the store's
    /// current version; the check and the replacement are indivisible with
    /// respect to any concurrent push. On any error the store is unchanged.
    pub fn push(
        &self,
        candidate: SystemSnapshot,
        known_baseline_version: u64,
    ) -> Result<PushReceipt, StoreError> {
        if candidate.version != known_baseline_version + 1 {
            return Err(StoreError::BadCandidate(format!(
                "candidate version {} does not succeed baseline {}",
                candidate.version, known_baseline_version
            )));
        }

        let digest_hex = snapshot_digest_hex(&candidate)
            .map_err(|e| StoreError::BadCandidate(e.to_string()))?;

        let mut inner = self.inner.lock();
        if inner.version != known_baseline_version {
            return Err(StoreError::VersionConflict {
                store_version: inner.version,
                baseline_version: known_baseline_version,
            });
        }

        inner.version += 1;
        inner.snapshot = candidate;
        inner.digest_hex = Some(digest_hex.clone());

        Ok(PushReceipt {
            version: inner.version,
            digest_hex,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(version: u64) -> SystemSnapshot {
        let mut s = SystemSnapshot::empty();
        s.id = format!("cid-{version}");
        s.version = version;
        s
    }

    #[test]
    fn pull_before_any_publish_is_empty_at_version_zero() {
        let store = SharedModelStore::new();
        let s = store.pull();
        assert_eq!(s.version, 0);
        assert_eq!(store.version(), 0);
        assert!(store.digest_hex().is_none());
    }

    #[test]
    fn push_bumps_version_by_exactly_one() {
        let store = SharedModelStore::new();
        let receipt = store.push(candidate(1), 0).unwrap();
        assert_eq!(receipt.version, 1);
        assert_eq!(store.version(), 1);
        assert_eq!(store.digest_hex().as_deref(), Some(receipt.digest_hex.as_str()));

        let receipt = store.push(candidate(2), 1).unwrap();
        assert_eq!(receipt.version, 2);
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn stale_baseline_conflicts_and_leaves_store_unchanged() {
        let store = SharedModelStore::new();
        store.push(candidate(1), 0).unwrap();
        let before_digest = store.digest_hex();
        let before = store.pull();

        let err = store.push(candidate(1), 0).unwrap_err();
        match err {
            StoreError::VersionConflict {
                store_version,
                baseline_version,
            } => {
                assert_eq!(store_version, 1);
                assert_eq!(baseline_version, 0);
            }
            other => panic!("expected VersionConflict, got {other:?}"),
        }

        assert_eq!(store.version(), 1);
        assert_eq!(store.digest_hex(), before_digest);
        assert_eq!(store.pull().id, before.id);
    }

    #[test]
    fn candidate_with_wrong_version_is_rejected_without_mutation() {
        let store = SharedModelStore::new();
        let err = store.push(candidate(5), 0).unwrap_err();
        assert!(matches!(err, StoreError::BadCandidate(_)));
        assert_eq!(store.version(), 0);
    }
}
