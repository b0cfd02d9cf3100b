//! Block builders, a ledger over [`MemDB`], and consumers that record what they are delivered.

use std::sync::{Arc, Mutex};

use rand_core::OsRng;

use lattice_sync::{
    ledger::{store::LedgerError, store::LedgerStore, transaction::LedgerTransaction},
    sync::config::Configuration,
    types::{
        block::{Block, ChangeBlock, OpenBlock, ReceiveBlock, SendBlock},
        crypto_primitives::SigningKey,
        data_types::{Account, Amount, BlockHash, Work},
    },
};

use super::mem_db::MemDB;

pub(crate) type Delivered = Arc<Mutex<Vec<Block>>>;

pub(crate) fn new_ledger() -> LedgerStore<MemDB> {
    LedgerStore::new(MemDB::new())
}

pub(crate) fn config() -> Configuration {
    Configuration::builder().log_events(false).build()
}

pub(crate) fn signing_key() -> SigningKey {
    SigningKey::generate(&mut OsRng)
}

// Every open block is signed with a fresh key, so each one opens a different account.
pub(crate) fn open(source: BlockHash) -> Block {
    OpenBlock::new(source, Account::new([1; 32]), &signing_key(), Work::new(5)).into()
}

pub(crate) fn send(previous: BlockHash) -> Block {
    SendBlock::new(
        previous,
        Account::new([0; 32]),
        Amount::new(1),
        &signing_key(),
        Work::new(4),
    )
    .into()
}

pub(crate) fn receive(previous: BlockHash, source: BlockHash) -> Block {
    ReceiveBlock::new(previous, source, &signing_key(), Work::new(0)).into()
}

pub(crate) fn change(previous: BlockHash) -> Block {
    ChangeBlock::new(previous, Account::new([2; 32]), &signing_key(), Work::new(3)).into()
}

/// Commit `blocks` into the resolved store and stage `unchecked` in the unchecked pool, in one
/// transaction.
pub(crate) fn seed(ledger: &mut LedgerStore<MemDB>, blocks: &[&Block], unchecked: &[&Block]) {
    let mut txn = ledger.begin();
    for block in blocks {
        txn.block_put(block).unwrap();
    }
    for block in unchecked {
        txn.unchecked_put(block).unwrap();
    }
    let write_batch = txn.into_write_batch();
    ledger.write(write_batch);
}

/// A consumer that only records the blocks it is delivered.
pub(crate) fn recording_consumer(
    delivered: &Delivered,
) -> impl FnMut(&mut LedgerTransaction<'_, MemDB>, &Block) -> Result<(), LedgerError> + Send + 'static
{
    let delivered = delivered.clone();
    move |_, block| {
        delivered.lock().unwrap().push(block.clone());
        Ok(())
    }
}

/// A consumer that commits every block it is delivered into the resolved store, then records it.
pub(crate) fn committing_consumer(
    delivered: &Delivered,
) -> impl FnMut(&mut LedgerTransaction<'_, MemDB>, &Block) -> Result<(), LedgerError> + Send + 'static
{
    let delivered = delivered.clone();
    move |txn, block| {
        txn.block_put(block)?;
        delivered.lock().unwrap().push(block.clone());
        Ok(())
    }
}

pub(crate) fn hashes(delivered: &Delivered) -> Vec<BlockHash> {
    delivered
        .lock()
        .unwrap()
        .iter()
        .map(|block| block.hash())
        .collect()
}
