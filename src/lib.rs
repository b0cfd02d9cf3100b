/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Dependency-ordered block synchronization for block-lattice ledgers.
//!
//! In a block lattice, every account has its own chain of blocks, and blocks on different chains
//! reference each other: a block that receives funds names the send block it receives from. A block
//! received from the network can therefore only be committed once its `previous` block, and its
//! `source` block if it has one, have been committed. This crate resolves such chains of unmet
//! dependencies.
//!
//! # Getting started
//!
//! 1. Implement the [pluggable persistence traits](ledger::pluggables) for your key-value store and
//!    wrap it in a [`LedgerStore`](ledger::store::LedgerStore).
//! 2. Build a [`Synchronizer`](sync::synchronizer::Synchronizer), either with
//!    [`Synchronizer::pull`](sync::synchronizer::Synchronizer::pull) /
//!    [`Synchronizer::push`](sync::synchronizer::Synchronizer::push), or with a
//!    [`SynchronizerSpec`](sync::synchronizer::SynchronizerSpec) to also register event handlers.
//! 3. Open a [transaction](ledger::transaction::LedgerTransaction), call
//!    [`synchronize`](sync::synchronizer::Synchronizer::synchronize), and write the transaction back.
//!
//! ```ignore
//! let mut synchronizer = Synchronizer::pull(
//!     Configuration::builder().log_events(true).build(),
//!     |txn, block| Ok(txn.block_put(block)?),
//! );
//!
//! let mut txn = ledger.begin();
//! let failed = synchronizer.synchronize(&mut txn, &hash);
//! let write_batch = txn.into_write_batch();
//! if !failed {
//!     ledger.write(write_batch);
//! }
//! ```

pub mod events;

pub mod ledger;

pub mod logging;

pub mod sync;

pub mod types;

pub(crate) mod event_bus;
