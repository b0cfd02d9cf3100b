//! Read-your-writes transaction scope over a [`KVStore`] snapshot.

use std::collections::HashMap;

use borsh::BorshSerialize;

use crate::types::{block::Block, data_types::BlockHash};

use super::{
    pluggables::{KVGet, KVStore, Key, WriteBatch},
    store::{KVSetError, LedgerWriteBatch},
    variables::{self, concat},
};

/// A transaction against the ledger.
///
/// Reads see the snapshot the transaction was opened on, overlaid with the transaction's own writes.
/// Writes are buffered in a [`WriteBatch`] and only reach the store when the batch returned by
/// [`into_write_batch`](Self::into_write_batch) is passed to
/// [`LedgerStore::write`](super::store::LedgerStore::write).
pub struct LedgerTransaction<'a, K: KVStore> {
    snapshot: K::Snapshot<'a>,
    // `None` records a deletion.
    overlay: HashMap<Vec<u8>, Option<Vec<u8>>>,
    write_batch: K::WriteBatch,
}

impl<'a, K: KVStore> LedgerTransaction<'a, K> {
    pub(super) fn new(snapshot: K::Snapshot<'a>) -> Self {
        LedgerTransaction {
            snapshot,
            overlay: HashMap::new(),
            write_batch: <K::WriteBatch as WriteBatch>::new(),
        }
    }

    /// Finish the transaction, returning the writes it made.
    pub fn into_write_batch(self) -> LedgerWriteBatch<K::WriteBatch> {
        LedgerWriteBatch(self.write_batch)
    }

    /* ↓↓↓ Blocks ↓↓↓ */

    /// Insert `block` into the resolved store. Inserting a block that is already present is a no-op.
    pub fn block_put(&mut self, block: &Block) -> Result<(), KVSetError> {
        let value = block
            .try_to_vec()
            .map_err(|err| KVSetError::SerializeValueError {
                key: Key::Block {
                    block: block.hash(),
                },
                source: err,
            })?;
        self.set(&concat(&variables::BLOCKS, &block.hash().bytes()), value);
        Ok(())
    }

    /* ↓↓↓ Unchecked ↓↓↓ */

    /// Stage `block` in the unchecked pool.
    pub fn unchecked_put(&mut self, block: &Block) -> Result<(), KVSetError> {
        let value = block
            .try_to_vec()
            .map_err(|err| KVSetError::SerializeValueError {
                key: Key::UncheckedBlock {
                    block: block.hash(),
                },
                source: err,
            })?;
        self.set(&concat(&variables::UNCHECKED, &block.hash().bytes()), value);
        Ok(())
    }

    /// Remove `block` from the unchecked pool. Removing an absent entry is a no-op.
    pub fn unchecked_del(&mut self, block: &BlockHash) {
        self.delete(&concat(&variables::UNCHECKED, &block.bytes()))
    }

    /* ↓↓↓ Unsynced ↓↓↓ */

    /// Mark `block` as committed but not yet sent to peers.
    pub fn unsynced_put(&mut self, block: &BlockHash) {
        self.set(&concat(&variables::UNSYNCED, &block.bytes()), Vec::new())
    }

    /// Clear the unsynced marker on `block`. Clearing an absent marker is a no-op.
    pub fn unsynced_del(&mut self, block: &BlockHash) {
        self.delete(&concat(&variables::UNSYNCED, &block.bytes()))
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) {
        self.write_batch.set(key, &value);
        self.overlay.insert(key.to_vec(), Some(value));
    }

    fn delete(&mut self, key: &[u8]) {
        self.write_batch.delete(key);
        self.overlay.insert(key.to_vec(), None);
    }
}

impl<K: KVStore> KVGet for LedgerTransaction<'_, K> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.overlay.get(key) {
            Some(value) => value.clone(),
            None => self.snapshot.get(key),
        }
    }
}
