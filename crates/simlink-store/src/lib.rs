//! simlink-store
//!
//! The shared side of Simlink:
//! - `SharedModelStore`: one published canonical snapshot plus its version
//!   counter, guarded by a single lock so a conditional push is one
//!   compare-and-swap
//! - `ClientSession`: the per-client publish state machine
//!   (pull -> edit -> compile -> push) with fail-fast conflict handling
//!
//! Retry policy is the caller's: the store never retries, never waits, and a
//! rejected client must re-pull before it can publish again.

pub mod session;
pub mod store;

pub use crate::session::{ClientSession, SessionError, SyncState};
pub use crate::store::{PushReceipt, SharedModelStore, StoreError};
