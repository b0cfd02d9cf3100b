//! Owning handle over the user-provided key-value store.
//!
//! # Transactions
//!
//! Everything a synchronization reads or writes goes through a single [`LedgerTransaction`] that the
//! caller opens with [`LedgerStore::begin`] before synchronizing and finishes after it:
//!
//! ```ignore
//! let mut txn = ledger.begin();
//! let failed = synchronizer.synchronize(&mut txn, &target);
//! let write_batch = txn.into_write_batch();
//! if !failed {
//!     ledger.write(write_batch);
//! }
//! ```
//!
//! Dropping the transaction (or its write batch) without writing it aborts it.

use std::fmt::{self, Display, Formatter};

use super::{
    pluggables::{KVGetError, KVStore, Key, WriteBatch},
    transaction::LedgerTransaction,
};

/// Read and write handle into the ledger tables.
pub struct LedgerStore<K: KVStore>(K);

impl<K: KVStore> LedgerStore<K> {
    /// Create a new instance of `LedgerStore` on top of `kv_store`.
    pub fn new(kv_store: K) -> Self {
        LedgerStore(kv_store)
    }

    /// Open a transaction that reads from a snapshot of the store taken now.
    pub fn begin(&self) -> LedgerTransaction<'_, K> {
        LedgerTransaction::new(self.0.snapshot())
    }

    /// Get a read-only snapshot of the committed state of the ledger.
    pub fn snapshot(&self) -> K::Snapshot<'_> {
        self.0.snapshot()
    }

    /// Atomically write the changes in `write_batch` into the store.
    pub fn write(&mut self, write_batch: LedgerWriteBatch<K::WriteBatch>) {
        self.0.write(write_batch.0)
    }
}

/// The writes made by a finished [`LedgerTransaction`], ready to be applied with
/// [`LedgerStore::write`].
pub struct LedgerWriteBatch<W: WriteBatch>(pub(super) W);

/// Error when reading from or writing to the ledger, or when a block consumer fails.
#[derive(Debug)]
pub enum LedgerError {
    /// Error when trying to get a value from the ledger's underlying [key value store][KVStore].
    KVGetError(KVGetError),

    /// Error when trying set a value into the ledger's underlying key value store.
    KVSetError(KVSetError),
}

impl From<KVGetError> for LedgerError {
    fn from(value: KVGetError) -> Self {
        LedgerError::KVGetError(value)
    }
}

impl From<KVSetError> for LedgerError {
    fn from(value: KVSetError) -> Self {
        LedgerError::KVSetError(value)
    }
}

impl Display for LedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::KVGetError(KVGetError::DeserializeValueError { key, source }) => {
                write!(f, "could not deserialize {}: {}", key, source)
            }
            LedgerError::KVSetError(KVSetError::SerializeValueError { key, source }) => {
                write!(f, "could not serialize {}: {}", key, source)
            }
        }
    }
}

/// Error when trying to serialize a value into the ledger's underlying key value store.
#[derive(Debug)]
pub enum KVSetError {
    SerializeValueError { key: Key, source: std::io::Error },
}
