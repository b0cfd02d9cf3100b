//! The persistent state that synchronization reads and writes.
//!
//! # Tables
//!
//! The ledger is made of three tables, described in [`variables`]:
//! 1. **Blocks**: the resolved store of committed blocks.
//! 2. **Unchecked**: blocks received from peers whose dependencies are not all committed yet.
//! 3. **Unsynced**: markers over committed blocks that have not been pushed to peers yet.
//!
//! # Pluggable persistence
//!
//! - The ledger is kept in persistent storage, most probably in the host's filesystem.
//! - Library users get to choose how exactly this is done.
//! - This crate merely requires that whatever the user provides as a persistence mechanism implements
//!   the abstract functionality of a key-value store with atomic, batched writes and snapshots.
//! - This abstract functionality is made concrete by the traits defined in the [`pluggables`] module.
//!
//! # Accessing the ledger
//!
//! Implementations of the pluggable traits get wrapped inside a [`LedgerStore`](store::LedgerStore),
//! which hands out [`LedgerTransaction`](transaction::LedgerTransaction)s. These put the tables in the
//! right places in the KV store and provide typed methods for reading and writing them.

pub mod pluggables;

pub mod store;

pub mod transaction;

pub mod variables;
