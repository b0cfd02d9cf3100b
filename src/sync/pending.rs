//! Where synchronization finds blocks that are not resolved yet, and how it knows a block needs no
//! more work.
//!
//! # Pull and push
//!
//! The two [`PendingSource`]s differ in what "pending" means:
//!
//! |Operation|[`PullSource`]|[`PushSource`]|
//! |---|---|---|
//! |`is_resolved`|The block is in the Blocks table.|The block is **not** marked unsynced (either unknown, or already sent).|
//! |`lookup_pending`|Read from the Unchecked table.|Read from the Blocks table. Push only walks committed blocks.|
//! |`consume`|Delete from the Unchecked table.|Clear the unsynced marker.|
//!
//! Pull stages whole block bodies in a table of their own, so the entry `lookup_pending` reads is the
//! same one `consume` removes. Push stages nothing but a marker over a block that already lives in the
//! Blocks table: `lookup_pending` never removes anything, and only `consume` mutates state. Clearing
//! the marker is what keeps a pushed block from being delivered twice.

use crate::{
    ledger::{
        pluggables::{KVGet, KVGetError, KVStore},
        transaction::LedgerTransaction,
    },
    types::{block::Block, data_types::BlockHash},
};

pub trait PendingSource {
    /// Check whether `block` needs no further work.
    fn is_resolved<G: KVGet + ?Sized>(&self, ledger: &G, block: &BlockHash) -> bool;

    /// Get the body of a `block` that is not resolved yet, if the pending pool has it.
    fn lookup_pending<G: KVGet + ?Sized>(
        &self,
        ledger: &G,
        block: &BlockHash,
    ) -> Result<Option<Block>, KVGetError>;

    /// Remove `block` from the pending pool after it has been delivered. Idempotent.
    fn consume<K: KVStore>(&self, txn: &mut LedgerTransaction<'_, K>, block: &BlockHash);
}

/// Completes inbound blocks staged in the Unchecked table.
#[derive(Clone, Copy, Debug, Default)]
pub struct PullSource;

impl PendingSource for PullSource {
    fn is_resolved<G: KVGet + ?Sized>(&self, ledger: &G, block: &BlockHash) -> bool {
        ledger.block_exists(block)
    }

    fn lookup_pending<G: KVGet + ?Sized>(
        &self,
        ledger: &G,
        block: &BlockHash,
    ) -> Result<Option<Block>, KVGetError> {
        ledger.unchecked_get(block)
    }

    fn consume<K: KVStore>(&self, txn: &mut LedgerTransaction<'_, K>, block: &BlockHash) {
        txn.unchecked_del(block)
    }
}

/// Walks committed blocks that are marked unsynced.
#[derive(Clone, Copy, Debug, Default)]
pub struct PushSource;

impl PendingSource for PushSource {
    fn is_resolved<G: KVGet + ?Sized>(&self, ledger: &G, block: &BlockHash) -> bool {
        !ledger.unsynced_exists(block)
    }

    fn lookup_pending<G: KVGet + ?Sized>(
        &self,
        ledger: &G,
        block: &BlockHash,
    ) -> Result<Option<Block>, KVGetError> {
        ledger.block_get(block)
    }

    fn consume<K: KVStore>(&self, txn: &mut LedgerTransaction<'_, K>, block: &BlockHash) {
        txn.unsynced_del(block)
    }
}
