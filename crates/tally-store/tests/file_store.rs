use std::fs;
use std::sync::Arc;
use tally_core::{Block, Ledger, Snapshot, SnapshotStore, StoreError};
use tally_store::FileStore;
use tempfile::tempdir;

fn sample_snapshot() -> Snapshot {
    let genesis = Block::genesis();
    let mut next = Block::new(1, vec!["alice pays bob".into()], genesis.hash.clone());
    next.seal();
    Snapshot {
        blocks: vec![genesis, next],
        pending: vec!["still pending".into()],
    }
}

#[test]
fn save_then_load_round_trips() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let store = FileStore::new(dir.path().join("tally.json"));

    let snapshot = sample_snapshot();
    store.save(&snapshot)?;
    let loaded = store.load()?;
    assert_eq!(loaded, snapshot);
    Ok(())
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path().join("absent.json"));
    assert!(matches!(store.load(), Err(StoreError::NotFound)));
}

#[test]
fn unparseable_file_is_corrupt() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("tally.json");
    fs::write(&path, b"{ not json")?;

    let store = FileStore::new(&path);
    assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    Ok(())
}

#[test]
fn save_overwrites_and_leaves_no_temp_residue() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let store = FileStore::new(dir.path().join("tally.json"));

    store.save(&sample_snapshot())?;
    let mut updated = sample_snapshot();
    updated.pending.push("one more".into());
    store.save(&updated)?;

    // Only the target file remains; the temp file was renamed over it.
    let entries: Vec<_> = fs::read_dir(dir.path())?.collect::<Result<_, _>>()?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].file_name(), "tally.json");
    assert_eq!(store.load()?, updated);
    Ok(())
}

#[test]
fn on_disk_format_is_pretty_camel_case_json() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("tally.json");
    let store = FileStore::new(&path);
    store.save(&sample_snapshot())?;

    let text = fs::read_to_string(&path)?;
    assert!(text.contains("\"blocks\""));
    assert!(text.contains("\"pending\""));
    assert!(text.contains("\"merkleRoot\""));
    assert!(text.contains("\"prevHash\""));
    // Pretty-printed, not a single line.
    assert!(text.lines().count() > 1);
    Ok(())
}

#[test]
fn ledger_state_survives_a_restart() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("tally.json");

    let store = Arc::new(FileStore::new(&path));
    let ledger = Ledger::open(Some(store));
    ledger.submit_transaction("sealed entry")?;
    ledger.mine_block()?;
    ledger.submit_transaction("pending entry")?;
    let blocks = ledger.chain();
    let pending = ledger.pending();
    drop(ledger);

    let reopened = Ledger::open(Some(Arc::new(FileStore::new(&path))));
    assert_eq!(reopened.chain(), blocks);
    assert_eq!(reopened.pending(), pending);
    assert!(reopened.is_valid());
    Ok(())
}

#[test]
fn corrupt_file_boots_a_fresh_genesis() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("tally.json");
    fs::write(&path, b"garbage")?;

    let ledger = Ledger::open(Some(Arc::new(FileStore::new(&path))));
    assert_eq!(ledger.chain().len(), 1);
    assert!(ledger.is_valid());

    // Bootstrap persisted the fresh chain over the unreadable file.
    let store = FileStore::new(&path);
    let snapshot = store.load()?;
    assert_eq!(snapshot.blocks.len(), 1);
    assert_eq!(snapshot.blocks[0].index, 0);
    Ok(())
}
