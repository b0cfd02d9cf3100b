//! Tests of ledger transactions: read-your-writes, commit, and abort.

use lattice_sync::{
    ledger::{pluggables::KVGet, store::LedgerStore},
    types::data_types::BlockHash,
};

mod common;

use common::{
    fixtures::{new_ledger, open, send},
    mem_db::MemDB,
};

#[test]
fn transaction_reads_its_own_writes() {
    let ledger = new_ledger();
    let block1 = open(BlockHash::zero());
    let block2 = send(block1.hash());

    let mut txn = ledger.begin();
    assert!(!txn.block_exists(&block1.hash()));

    txn.block_put(&block1).unwrap();
    txn.unchecked_put(&block2).unwrap();
    txn.unsynced_put(&block1.hash());

    assert_eq!(txn.block_get(&block1.hash()).unwrap(), Some(block1.clone()));
    assert_eq!(txn.unchecked_get(&block2.hash()).unwrap(), Some(block2.clone()));
    assert!(txn.unsynced_exists(&block1.hash()));

    txn.unchecked_del(&block2.hash());
    txn.unsynced_del(&block1.hash());
    assert!(txn.unchecked_get(&block2.hash()).unwrap().is_none());
    assert!(!txn.unsynced_exists(&block1.hash()));
}

#[test]
fn written_transaction_persists() {
    let mut ledger = new_ledger();
    let block1 = open(BlockHash::zero());
    let block2 = send(block1.hash());

    let mut txn = ledger.begin();
    txn.block_put(&block1).unwrap();
    txn.unchecked_put(&block2).unwrap();
    txn.unsynced_put(&block1.hash());
    let write_batch = txn.into_write_batch();
    ledger.write(write_batch);

    let snapshot = ledger.snapshot();
    assert_eq!(snapshot.block_get(&block1.hash()).unwrap(), Some(block1.clone()));
    assert_eq!(snapshot.unchecked_get(&block2.hash()).unwrap(), Some(block2.clone()));
    assert!(snapshot.unsynced_exists(&block1.hash()));
}

#[test]
fn dropped_transaction_aborts() {
    let kv_store = MemDB::new();
    let ledger = LedgerStore::new(kv_store.clone());
    let block1 = open(BlockHash::zero());

    {
        let mut txn = ledger.begin();
        txn.block_put(&block1).unwrap();
        txn.unsynced_put(&block1.hash());
    }

    assert_eq!(kv_store.len(), 0);
    let snapshot = ledger.snapshot();
    assert!(!snapshot.block_exists(&block1.hash()));
    assert!(!snapshot.unsynced_exists(&block1.hash()));
}

#[test]
fn deleting_absent_entries_is_a_no_op() {
    let mut ledger = new_ledger();
    let block1 = open(BlockHash::zero());

    let mut txn = ledger.begin();
    txn.unchecked_del(&block1.hash());
    txn.unchecked_del(&block1.hash());
    txn.unsynced_del(&block1.hash());
    let write_batch = txn.into_write_batch();
    ledger.write(write_batch);

    let snapshot = ledger.snapshot();
    assert!(snapshot.unchecked_get(&block1.hash()).unwrap().is_none());
    assert!(!snapshot.unsynced_exists(&block1.hash()));
}

#[test]
fn delete_after_put_in_one_transaction_leaves_nothing() {
    let mut ledger = new_ledger();
    let block1 = open(BlockHash::zero());

    let mut txn = ledger.begin();
    txn.unchecked_put(&block1).unwrap();
    txn.unchecked_del(&block1.hash());
    let write_batch = txn.into_write_batch();
    ledger.write(write_batch);

    assert!(ledger
        .snapshot()
        .unchecked_get(&block1.hash())
        .unwrap()
        .is_none());
}
