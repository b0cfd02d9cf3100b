//! Traits for pluggable ledger persistence.

use std::fmt::Display;

use borsh::BorshDeserialize;

use crate::types::{block::Block, data_types::BlockHash};

use super::variables::{self, concat};

/// A key-value store with atomic, batched writes.
///
/// Library users implement this for whatever persistence mechanism they want (an embedded database,
/// a file, or simply memory) and hand it to [`LedgerStore::new`](super::store::LedgerStore::new).
pub trait KVStore: KVGet + Clone + Send + 'static {
    type WriteBatch: WriteBatch;
    type Snapshot<'a>: 'a + KVGet;

    /// Atomically apply every insertion and deletion in `wb`.
    fn write(&mut self, wb: Self::WriteBatch);

    /// Get a consistent, read-only view of the store. Writes made after the snapshot is taken must not
    /// be visible through it.
    fn snapshot<'b>(&'b self) -> Self::Snapshot<'_>;
}

/// Read access to a key-value store, plus typed getters for each ledger table.
pub trait KVGet {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    /* ↓↓↓ Blocks ↓↓↓ */

    fn block_get(&self, block: &BlockHash) -> Result<Option<Block>, KVGetError> {
        if let Some(bytes) = self.get(&concat(&variables::BLOCKS, &block.bytes())) {
            Ok(Some(Block::deserialize(&mut bytes.as_slice()).map_err(
                |err| KVGetError::DeserializeValueError {
                    key: Key::Block { block: *block },
                    source: err,
                },
            )?))
        } else {
            Ok(None)
        }
    }

    fn block_exists(&self, block: &BlockHash) -> bool {
        self.get(&concat(&variables::BLOCKS, &block.bytes()))
            .is_some()
    }

    /* ↓↓↓ Unchecked ↓↓↓ */

    fn unchecked_get(&self, block: &BlockHash) -> Result<Option<Block>, KVGetError> {
        if let Some(bytes) = self.get(&concat(&variables::UNCHECKED, &block.bytes())) {
            Ok(Some(Block::deserialize(&mut bytes.as_slice()).map_err(
                |err| KVGetError::DeserializeValueError {
                    key: Key::UncheckedBlock { block: *block },
                    source: err,
                },
            )?))
        } else {
            Ok(None)
        }
    }

    /* ↓↓↓ Unsynced ↓↓↓ */

    fn unsynced_exists(&self, block: &BlockHash) -> bool {
        self.get(&concat(&variables::UNSYNCED, &block.bytes()))
            .is_some()
    }
}

/// Error when trying to read a value corresponding to a given key from the [key value store][KVStore].
///
/// Absent values are not errors: getters return `Ok(None)` for them.
#[derive(Debug)]
pub enum KVGetError {
    DeserializeValueError { key: Key, source: std::io::Error },
}

#[derive(Debug)]
pub enum Key {
    Block { block: BlockHash },
    UncheckedBlock { block: BlockHash },
    UnsyncedMarker { block: BlockHash },
}

impl Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            &Key::Block { block } => write!(f, "Block {}", block),
            &Key::UncheckedBlock { block } => write!(f, "Unchecked block {}", block),
            &Key::UnsyncedMarker { block } => write!(f, "Unsynced marker for block {}", block),
        }
    }
}

pub trait WriteBatch {
    fn new() -> Self;
    fn set(&mut self, key: &[u8], value: &[u8]);
    fn delete(&mut self, key: &[u8]);
}
