//! Single-client publish flows against a fresh store.

use anyhow::Result;

use simlink_store::{ClientSession, SharedModelStore};

#[test]
fn first_publish_lands_at_version_one() -> Result<()> {
    let store = SharedModelStore::new();
    assert_eq!(store.version(), 0);

    let mut esd = ClientSession::new("esd");
    esd.pull(&store);
    esd.edit(|ws| {
        let mcu = ws.add_functional_block("MCU", None).unwrap();
        ws.add_port(&mcu, "UART", Vec::new()).unwrap();
    })?;
    esd.compile()?;
    let receipt = esd.publish(&store)?;

    assert_eq!(receipt.version, 1);
    assert_eq!(store.version(), 1);
    assert_eq!(store.digest_hex().as_deref(), Some(receipt.digest_hex.as_str()));

    // A fresh pull sees the published block and port.
    let snapshot = store.pull();
    assert_eq!(snapshot.version, 1);
    let functional = snapshot.functional_model.expect("functional model published");
    assert_eq!(functional.functional_blocks.len(), 1);
    assert_eq!(functional.functional_blocks[0].name, "MCU");
    assert_eq!(functional.functional_blocks[0].ports.len(), 1);
    assert_eq!(functional.functional_blocks[0].ports[0].name, "UART");
    Ok(())
}

#[test]
fn versions_increase_by_one_per_published_cycle() -> Result<()> {
    let store = SharedModelStore::new();
    let mut esd = ClientSession::new("esd");

    for expected in 1..=3u64 {
        esd.pull(&store);
        esd.edit(|ws| {
            ws.add_functional_block("Block", None).unwrap();
        })?;
        esd.compile()?;
        let receipt = esd.publish(&store)?;
        assert_eq!(receipt.version, expected);
        assert_eq!(store.version(), expected);
    }
    Ok(())
}

#[test]
fn unconfigured_software_host_publishes_a_placeholder_device() -> Result<()> {
    let store = SharedModelStore::new();
    let mut esd = ClientSession::new("esd");

    esd.pull(&store);
    esd.edit(|ws| {
        let sw_project = ws.add_software_project(None);
        let mcu = ws.add_functional_block("MCU", None).unwrap();
        let kc = ws.add_key_component(&mcu, "R7FA6M3AH3CFB").unwrap();
        ws.add_software_component(&mcu, &kc, "WiFi Common", &sw_project)
            .unwrap();
        // No configure_device call for kc.
    })?;
    let report = esd.compile()?;
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.code == "device.placeholder"));
    esd.publish(&store)?;

    let snapshot = store.pull();
    assert_eq!(snapshot.device_models.len(), 1);
    let dm = &snapshot.device_models[0];
    assert!(dm.is_placeholder());
    assert_eq!(dm.device_mpn, "R7FA6M3AH3CFB");
    assert_eq!(
        snapshot.software_models[0].device_model.as_deref(),
        Some(dm.id.as_str())
    );
    Ok(())
}

#[test]
fn published_snapshot_serializes_with_contract_field_names() -> Result<()> {
    let store = SharedModelStore::new();
    let mut esd = ClientSession::new("esd");
    esd.pull(&store);
    esd.edit(|ws| {
        ws.add_functional_block("MCU", None).unwrap();
    })?;
    esd.compile()?;
    esd.publish(&store)?;

    let v = serde_json::to_value(store.pull())?;
    let obj = v.as_object().unwrap();
    for key in ["id", "version", "functionalModel", "hardwareModels", "softwareModels", "deviceModels"] {
        assert!(obj.contains_key(key), "missing wire field {key}");
    }
    Ok(())
}
