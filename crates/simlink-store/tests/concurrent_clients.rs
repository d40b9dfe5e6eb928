//! Multi-client conflict behavior: the store accepts exactly one push per
//! baseline version, and a losing client observes the conflict without
//! disturbing the winner's published state.

use std::sync::Arc;
use std::thread;

use anyhow::Result;
use assert_matches::assert_matches;

use simlink_core::model::sdm::SystemSnapshot;
use simlink_store::{ClientSession, SessionError, SharedModelStore, StoreError};

#[test]
fn second_push_from_stale_baseline_is_rejected() -> Result<()> {
    let store = SharedModelStore::new();

    // Both clients pull the same baseline at version 0.
    let mut esd = ClientSession::new("esd");
    let mut e2 = ClientSession::new("e2");
    esd.pull(&store);
    e2.pull(&store);
    assert_eq!(esd.baseline_version(), Some(0));
    assert_eq!(e2.baseline_version(), Some(0));

    // Client A edits and publishes first.
    esd.edit(|ws| {
        let mcu = ws.add_functional_block("MCU", None).unwrap();
        ws.add_key_component(&mcu, "R7FA6M5AG2CBG").unwrap();
    })?;
    esd.compile()?;
    esd.publish(&store)?;
    assert_eq!(store.version(), 1);
    let published_digest = store.digest_hex();

    // Client B edits independently against the stale baseline.
    e2.edit(|ws| {
        ws.add_functional_block("FSP driver host", None).unwrap();
    })?;
    e2.compile()?;
    let err = e2.publish(&store).unwrap_err();
    assert_matches!(
        err,
        SessionError::Store(StoreError::VersionConflict {
            store_version: 1,
            baseline_version: 0,
        })
    );
    assert_eq!(e2.state().name(), "Rejected");

    // Only A's changes are visible; the store did not move.
    assert_eq!(store.version(), 1);
    assert_eq!(store.digest_hex(), published_digest);
    let snapshot = store.pull();
    let functional = snapshot.functional_model.unwrap();
    assert_eq!(functional.functional_blocks.len(), 1);
    assert_eq!(functional.functional_blocks[0].name, "MCU");

    // B recovers by re-pulling the new baseline and recompiling.
    e2.pull(&store);
    assert_eq!(e2.baseline_version(), Some(1));
    e2.compile()?;
    e2.publish(&store)?;
    assert_eq!(store.version(), 2);
    Ok(())
}

#[test]
fn direct_push_against_stale_baseline_leaves_store_intact() {
    let store = SharedModelStore::new();

    let mut winner = SystemSnapshot::empty();
    winner.id = "cid-winner".to_string();
    winner.version = 1;
    store.push(winner, 0).unwrap();

    let mut loser = SystemSnapshot::empty();
    loser.id = "cid-loser".to_string();
    loser.version = 1;
    let err = store.push(loser, 0).unwrap_err();
    assert_matches!(err, StoreError::VersionConflict { .. });

    assert_eq!(store.version(), 1);
    assert_eq!(store.pull().id, "cid-winner");
}

#[test]
fn exactly_one_concurrent_push_wins_per_baseline() {
    let store = Arc::new(SharedModelStore::new());
    let clients = 8;

    let handles: Vec<_> = (0..clients)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut candidate = SystemSnapshot::empty();
                candidate.id = format!("cid-client-{i}");
                candidate.version = 1;
                store.push(candidate, 0).is_ok()
            })
        })
        .collect();

    let wins = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|won| *won)
        .count();

    assert_eq!(wins, 1, "compare-and-swap admits exactly one winner");
    assert_eq!(store.version(), 1);
    assert!(store.pull().id.starts_with("cid-client-"));
}
