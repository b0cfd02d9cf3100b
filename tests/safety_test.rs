//! Tests that corrupted ledgers and failing consumers surface as errors instead of looping, overflowing
//! the stack, or delivering out of order.

use std::io;

use borsh::BorshSerialize;

use lattice_sync::{
    ledger::{
        pluggables::{KVGet, KVStore, Key, WriteBatch},
        store::{KVSetError, LedgerError, LedgerStore},
        variables::{self, concat},
    },
    sync::{
        config::Configuration,
        synchronizer::{PullSynchronizer, SyncError, Synchronizer},
    },
    types::data_types::{BlockHash, SyncDepth},
};

mod common;

use common::{
    fixtures::{committing_consumer, config, new_ledger, open, seed, send, Delivered},
    mem_db::{MemDB, MemWriteBatch},
};

fn depth_limited(max_depth: u32) -> Configuration {
    Configuration::builder()
        .max_depth(SyncDepth::new(max_depth))
        .log_events(false)
        .build()
}

#[test]
fn cycle_is_detected() {
    let mut kv_store = MemDB::new();
    let corrupted = BlockHash::new([42; 32]);
    // An unchecked entry stored under `corrupted` whose body names `corrupted` as its previous block.
    let body = send(corrupted);
    let mut wb = MemWriteBatch::new();
    wb.set(
        &concat(&variables::UNCHECKED, &corrupted.bytes()),
        &body.try_to_vec().unwrap(),
    );
    kv_store.write(wb);
    let ledger = LedgerStore::new(kv_store);

    let delivered = Delivered::default();
    let mut sync = Synchronizer::pull(config(), committing_consumer(&delivered));
    let mut txn = ledger.begin();
    match sync.try_synchronize(&mut txn, &corrupted) {
        Err(err @ SyncError::CycleDetected { .. }) => assert!(err.is_fatal()),
        _ => panic!("expected a cycle"),
    }
    assert!(delivered.lock().unwrap().is_empty());
}

#[test]
fn depth_limit_bounds_blocks_in_flight() {
    let mut ledger = new_ledger();
    let block1 = open(BlockHash::zero());
    let mut chain = vec![send(block1.hash())];
    for _ in 0..4 {
        let previous = chain[chain.len() - 1].hash();
        chain.push(send(previous));
    }
    let unchecked: Vec<_> = chain.iter().collect();
    seed(&mut ledger, &[&block1], &unchecked);
    let target = chain[4].hash();

    let delivered = Delivered::default();
    let mut sync = Synchronizer::pull(depth_limited(4), committing_consumer(&delivered));
    {
        let mut txn = ledger.begin();
        match sync.try_synchronize(&mut txn, &target) {
            Err(SyncError::DepthLimitExceeded { limit }) => assert_eq!(limit, SyncDepth::new(4)),
            _ => panic!("expected the depth limit to be hit"),
        }
    }
    assert!(delivered.lock().unwrap().is_empty());

    let mut sync = Synchronizer::pull(depth_limited(5), committing_consumer(&delivered));
    let mut txn = ledger.begin();
    assert_eq!(sync.try_synchronize(&mut txn, &target).unwrap(), 5);
    assert_eq!(*delivered.lock().unwrap(), chain);
}

#[test]
fn consumer_error_aborts_before_consuming() {
    let mut ledger = new_ledger();
    let block1 = open(BlockHash::zero());
    let block2 = send(block1.hash());
    seed(&mut ledger, &[&block1], &[&block2]);

    let mut sync = PullSynchronizer::<MemDB>::pull(config(), |_, block| {
        Err(LedgerError::KVSetError(KVSetError::SerializeValueError {
            key: Key::Block {
                block: block.hash(),
            },
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        }))
    });
    let mut txn = ledger.begin();
    match sync.try_synchronize(&mut txn, &block2.hash()) {
        Err(err @ SyncError::LedgerError(_)) => assert!(err.is_fatal()),
        _ => panic!("expected the consumer's error"),
    }
    assert_eq!(txn.unchecked_get(&block2.hash()).unwrap(), Some(block2));
}

#[test]
fn undecodable_pending_entry_is_a_ledger_error() {
    let mut kv_store = MemDB::new();
    let garbage = BlockHash::new([13; 32]);
    let mut wb = MemWriteBatch::new();
    wb.set(&concat(&variables::UNCHECKED, &garbage.bytes()), &[0xFF, 0x01]);
    kv_store.write(wb);
    let ledger = LedgerStore::new(kv_store);

    let delivered = Delivered::default();
    let mut sync = Synchronizer::pull(config(), committing_consumer(&delivered));
    let mut txn = ledger.begin();
    assert!(matches!(
        sync.try_synchronize(&mut txn, &garbage),
        Err(SyncError::LedgerError(LedgerError::KVGetError(_)))
    ));
}
