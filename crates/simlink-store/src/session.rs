//! Per-client publish sessions.
//!
//! A `ClientSession` drives one client through the optimistic publish cycle
//! as an explicit state machine:
//!
//! ```text
//! Idle -> Pulled(v) -> Edited -> Compiled(v+1) -> { Published(v+1) | Rejected }
//! ```
//!
//! Conflicts and out-of-order calls are state transitions, not opportunistic
//! exceptions: a rejected push moves the session to `Rejected` and the client
//! must re-pull. Reconciliation of rejected work against the new baseline (an
//! "ECO" workflow) is an extension point, deliberately not implemented.
//!
//! The session owns the client's private `DesignWorkspace`; edits never touch
//! the baseline copy, and the store never sees working state.

use std::mem;

use thiserror::Error;

use simlink_core::compiler::{CompileReport, ModelCompiler};
use simlink_core::model::sdm::SystemSnapshot;
use simlink_core::workspace::DesignWorkspace;
use simlink_core::SimlinkError;

use crate::store::{PushReceipt, SharedModelStore, StoreError};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Compile(#[from] SimlinkError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid session transition: cannot {action} from state {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

/// Where a session stands in the publish cycle.
#[derive(Debug)]
pub enum SyncState {
    /// No baseline held.
    Idle,
    /// Holding an isolated copy of the store snapshot as the baseline.
    Pulled { baseline: SystemSnapshot },
    /// The private working model has been edited; the baseline is untouched.
    Edited { baseline: SystemSnapshot },
    /// A candidate snapshot versioned baseline+1 is ready to push.
    Compiled {
        baseline_version: u64,
        candidate: SystemSnapshot,
    },
    /// The store accepted the push; the candidate is the new baseline.
    Published { baseline: SystemSnapshot },
    /// The store's version advanced past the baseline; re-pull to continue.
    Rejected { store_version: u64 },
}

impl SyncState {
    pub fn name(&self) -> &'static str {
        match self {
            SyncState::Idle => "Idle",
            SyncState::Pulled { .. } => "Pulled",
            SyncState::Edited { .. } => "Edited",
            SyncState::Compiled { .. } => "Compiled",
            SyncState::Published { .. } => "Published",
            SyncState::Rejected { .. } => "Rejected",
        }
    }
}

/// One client's connection to the shared store.
#[derive(Debug)]
pub struct ClientSession {
    client_id: String,
    compiler: ModelCompiler,
    workspace: DesignWorkspace,
    state: SyncState,
}

impl ClientSession {
    pub fn new(client_id: impl Into<String>) -> Self {
        let client_id = client_id.into();
        Self {
            compiler: ModelCompiler::new(&client_id),
            workspace: DesignWorkspace::new(format!("esd-{client_id}")),
            client_id,
            state: SyncState::Idle,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn workspace(&self) -> &DesignWorkspace {
        &self.workspace
    }

    /// The version of the baseline currently held, if any.
    pub fn baseline_version(&self) -> Option<u64> {
        match &self.state {
            SyncState::Pulled { baseline }
            | SyncState::Edited { baseline }
            | SyncState::Published { baseline } => Some(baseline.version),
            SyncState::Compiled {
                baseline_version, ..
            } => Some(*baseline_version),
            SyncState::Idle | SyncState::Rejected { .. } => None,
        }
    }

    /// Take an isolated copy of the store snapshot as the new baseline.
    /// Allowed from any state; discards any un-published candidate.
    pub fn pull(&mut self, store: &SharedModelStore) {
        self.state = SyncState::Pulled {
            baseline: store.pull(),
        };
    }

    /// Mutate the private working model. The baseline copy is untouched.
    pub fn edit<F>(&mut self, f: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut DesignWorkspace),
    {
        match self.state {
            SyncState::Pulled { .. } | SyncState::Edited { .. } | SyncState::Published { .. } => {}
            ref other => {
                return Err(SessionError::InvalidTransition {
                    action: "edit",
                    state: other.name(),
                })
            }
        }

        f(&mut self.workspace);

        let baseline = match mem::replace(&mut self.state, SyncState::Idle) {
            SyncState::Pulled { baseline }
            | SyncState::Edited { baseline }
            | SyncState::Published { baseline } => baseline,
            _ => unreachable!("edit precondition checked above"),
        };
        self.state = SyncState::Edited { baseline };
        Ok(())
    }

    /// Compile the working model into a candidate snapshot versioned
    /// baseline+1. On failure the session stays edit-able with the same
    /// baseline; no candidate is retained.
    pub fn compile(&mut self) -> Result<CompileReport, SessionError> {
        match self.state {
            SyncState::Pulled { .. } | SyncState::Edited { .. } => {}
            ref other => {
                return Err(SessionError::InvalidTransition {
                    action: "compile",
                    state: other.name(),
                })
            }
        }

        let baseline = match mem::replace(&mut self.state, SyncState::Idle) {
            SyncState::Pulled { baseline } | SyncState::Edited { baseline } => baseline,
            _ => unreachable!("compile precondition checked above"),
        };

        match self.workspace.compile(&self.compiler, &baseline) {
            Ok(report) => {
                self.state = SyncState::Compiled {
                    baseline_version: baseline.version,
                    candidate: report.snapshot.clone(),
                };
                Ok(report)
            }
            Err(e) => {
                self.state = SyncState::Edited { baseline };
                Err(e.into())
            }
        }
    }

    /// Push the compiled candidate. Success makes the candidate the new
    /// baseline; a version conflict moves the session to `Rejected` and
    /// leaves the store untouched.
    pub fn publish(&mut self, store: &SharedModelStore) -> Result<PushReceipt, SessionError> {
        let (baseline_version, candidate) =
            match mem::replace(&mut self.state, SyncState::Idle) {
                SyncState::Compiled {
                    baseline_version,
                    candidate,
                } => (baseline_version, candidate),
                other => {
                    let state = other.name();
                    self.state = other;
                    return Err(SessionError::InvalidTransition {
                        action: "publish",
                        state,
                    });
                }
            };

        match store.push(candidate.clone(), baseline_version) {
            Ok(receipt) => {
                self.state = SyncState::Published {
                    baseline: candidate,
                };
                Ok(receipt)
            }
            Err(StoreError::VersionConflict {
                store_version,
                baseline_version,
            }) => {
                self.state = SyncState::Rejected { store_version };
                Err(StoreError::VersionConflict {
                    store_version,
                    baseline_version,
                }
                .into())
            }
            Err(e) => {
                // A malformed candidate is a caller bug, not a conflict; keep
                // the candidate so the state remains inspectable.
                self.state = SyncState::Compiled {
                    baseline_version,
                    candidate,
                };
                Err(e.into())
            }
        }
    }
}
