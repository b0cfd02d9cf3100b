/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! The dependency-ordered block resolver.
//!
//! # Algorithm
//!
//! Given a target hash, [`Synchronizer::synchronize`] resolves every transitive dependency of the
//! target through its [`PendingSource`] and hands each block to the consumer, dependencies first and
//! target last:
//!
//! ```text
//! resolve(hash):
//!     if hash is zero: FAIL
//!     if is_resolved(hash): SUCCESS, no delivery
//!     block = lookup_pending(hash), or FAIL if absent
//!     for each dependency d of block (previous, then source):
//!         if not is_resolved(d) and resolve(d) fails: FAIL
//!     deliver(block)
//!     consume(hash)
//!     SUCCESS
//! ```
//!
//! The recursion is run on an explicit stack of [`Frame`]s so that its depth is bounded by
//! [`max_depth`](super::config::Configuration::max_depth) rather than by the thread's stack size.
//! The traversal order is exactly that of the recursive form.
//!
//! # Deliveries are not rolled back
//!
//! The first dependency that can be found neither in the resolved store nor in the pending pool aborts
//! the whole call. Blocks already delivered by earlier branches of the same call stay delivered: the
//! consumer has seen them, and whatever it wrote stays in the caller's transaction. Callers that need
//! all-or-nothing semantics should drop the transaction when `synchronize` fails.
//!
//! # Transactions
//!
//! The synchronizer never opens, commits, or aborts transactions. It reads and writes exclusively
//! through the [`LedgerTransaction`] it is given, and may be called any number of times within the
//! same transaction.

use std::{
    collections::HashSet,
    fmt::{self, Display, Formatter},
    time::SystemTime,
    vec,
};

use typed_builder::TypedBuilder;

use crate::{
    event_bus::{EventHandlers, HandlerPtr},
    events::*,
    ledger::{
        pluggables::{KVGetError, KVStore},
        store::LedgerError,
        transaction::LedgerTransaction,
    },
    types::{
        block::Block,
        data_types::{BlockHash, SyncDepth},
    },
};

use super::{
    config::Configuration,
    pending::{PendingSource, PullSource, PushSource},
};

/// Caller-supplied closure invoked once per resolved block, in dependency order.
///
/// Typically persists the block into the resolved store (with
/// [`block_put`](LedgerTransaction::block_put)) and/or forwards it to a peer.
pub type Consumer<K> =
    Box<dyn FnMut(&mut LedgerTransaction<'_, K>, &Block) -> Result<(), LedgerError> + Send>;

/// Resolves inbound blocks staged in the Unchecked table.
pub type PullSynchronizer<K> = Synchronizer<K, PullSource>;

/// Walks committed blocks that have not been sent to peers yet.
pub type PushSynchronizer<K> = Synchronizer<K, PushSource>;

/// Stores everything needed to build a [`Synchronizer`]: its pending source, its consumer, its
/// [`Configuration`], and optional event handlers.
#[derive(TypedBuilder)]
#[builder(builder_method(doc = "
    Create a builder for building a [SynchronizerSpec]. On the builder call the following methods to construct a valid [SynchronizerSpec].

    Required:
    - `.pending_source(...)`
    - `.consumer(...)`
    - `.configuration(...)`

    Optional:
    - `.on_start_sync(...)`
    - `.on_deliver_block(...)`
    - `.on_consume_pending(...)`
    - `.on_end_sync(...)`
    - `.on_sync_failure(...)`
"))]
pub struct SynchronizerSpec<K: KVStore, P: PendingSource> {
    #[builder(setter(doc = "Set where pending blocks are found: `PullSource` or `PushSource`. Required."))]
    pending_source: P,
    #[builder(setter(transform = |consumer: impl FnMut(&mut LedgerTransaction<'_, K>, &Block) -> Result<(), LedgerError> + Send + 'static| Box::new(consumer) as Consumer<K>,
    doc = "Set the closure that every resolved block is delivered to. Required."))]
    consumer: Consumer<K>,
    #[builder(setter(doc = "Set the synchronizer's configuration. Required."))]
    configuration: Configuration,
    #[builder(default, setter(transform = |handler: impl Fn(&StartSyncEvent) + Send + 'static| Some(Box::new(handler) as HandlerPtr<StartSyncEvent>),
    doc = "Register a handler closure to be invoked when a synchronization starts. Optional."))]
    on_start_sync: Option<HandlerPtr<StartSyncEvent>>,
    #[builder(default, setter(transform = |handler: impl Fn(&DeliverBlockEvent) + Send + 'static| Some(Box::new(handler) as HandlerPtr<DeliverBlockEvent>),
    doc = "Register a handler closure to be invoked after a block is delivered to the consumer. Optional."))]
    on_deliver_block: Option<HandlerPtr<DeliverBlockEvent>>,
    #[builder(default, setter(transform = |handler: impl Fn(&ConsumePendingEvent) + Send + 'static| Some(Box::new(handler) as HandlerPtr<ConsumePendingEvent>),
    doc = "Register a handler closure to be invoked after a delivered block is removed from the pending pool. Optional."))]
    on_consume_pending: Option<HandlerPtr<ConsumePendingEvent>>,
    #[builder(default, setter(transform = |handler: impl Fn(&EndSyncEvent) + Send + 'static| Some(Box::new(handler) as HandlerPtr<EndSyncEvent>),
    doc = "Register a handler closure to be invoked after a synchronization succeeds. Optional."))]
    on_end_sync: Option<HandlerPtr<EndSyncEvent>>,
    #[builder(default, setter(transform = |handler: impl Fn(&SyncFailureEvent) + Send + 'static| Some(Box::new(handler) as HandlerPtr<SyncFailureEvent>),
    doc = "Register a handler closure to be invoked after a synchronization fails. Optional."))]
    on_sync_failure: Option<HandlerPtr<SyncFailureEvent>>,
}

impl<K: KVStore, P: PendingSource> SynchronizerSpec<K, P> {
    /// Assemble the [`Synchronizer`] described by this spec.
    pub fn assemble(self) -> Synchronizer<K, P> {
        let event_handlers = EventHandlers::new(
            self.configuration.log_events,
            self.on_start_sync,
            self.on_deliver_block,
            self.on_consume_pending,
            self.on_end_sync,
            self.on_sync_failure,
        );

        Synchronizer {
            pending_source: self.pending_source,
            consumer: self.consumer,
            config: self.configuration,
            event_handlers,
        }
    }
}

/// Dependency-ordered resolver, generic over where it finds pending blocks.
pub struct Synchronizer<K: KVStore, P: PendingSource> {
    pending_source: P,
    consumer: Consumer<K>,
    config: Configuration,
    event_handlers: EventHandlers,
}

impl<K: KVStore> Synchronizer<K, PullSource> {
    /// Create a synchronizer that completes blocks staged in the Unchecked table.
    pub fn pull(
        configuration: Configuration,
        consumer: impl FnMut(&mut LedgerTransaction<'_, K>, &Block) -> Result<(), LedgerError>
            + Send
            + 'static,
    ) -> Self {
        SynchronizerSpec::<K, PullSource>::builder()
            .pending_source(PullSource)
            .consumer(consumer)
            .configuration(configuration)
            .build()
            .assemble()
    }
}

impl<K: KVStore> Synchronizer<K, PushSource> {
    /// Create a synchronizer that walks committed blocks marked unsynced.
    pub fn push(
        configuration: Configuration,
        consumer: impl FnMut(&mut LedgerTransaction<'_, K>, &Block) -> Result<(), LedgerError>
            + Send
            + 'static,
    ) -> Self {
        SynchronizerSpec::<K, PushSource>::builder()
            .pending_source(PushSource)
            .consumer(consumer)
            .configuration(configuration)
            .build()
            .assemble()
    }
}

impl<K: KVStore, P: PendingSource> Synchronizer<K, P> {
    /// Deliver `target` and every transitive dependency of it that is not resolved yet.
    ///
    /// Returns `true` if synchronization **failed**, and `false` if it succeeded, including when
    /// `target` was already resolved and nothing was delivered. Use
    /// [`try_synchronize`](Self::try_synchronize) to learn why a call failed.
    pub fn synchronize(&mut self, txn: &mut LedgerTransaction<'_, K>, target: &BlockHash) -> bool {
        self.try_synchronize(txn, target).is_err()
    }

    /// Deliver `target` and every transitive dependency of it that is not resolved yet, returning how
    /// many blocks were delivered.
    pub fn try_synchronize(
        &mut self,
        txn: &mut LedgerTransaction<'_, K>,
        target: &BlockHash,
    ) -> Result<usize, SyncError> {
        self.publish(Event::StartSync(StartSyncEvent {
            timestamp: SystemTime::now(),
            target: *target,
        }));

        let mut blocks_delivered = 0;
        match self.resolve(txn, target, &mut blocks_delivered) {
            Ok(()) => {
                self.publish(Event::EndSync(EndSyncEvent {
                    timestamp: SystemTime::now(),
                    target: *target,
                    blocks_delivered,
                }));
                Ok(blocks_delivered)
            }
            Err(err) => {
                if err.is_fatal() {
                    log::error!("Synchronizing {} aborted: {}", target, err);
                }
                self.publish(Event::SyncFailure(SyncFailureEvent {
                    timestamp: SystemTime::now(),
                    target: *target,
                    blocks_delivered,
                    reason: err.to_string(),
                }));
                Err(err)
            }
        }
    }

    fn resolve(
        &mut self,
        txn: &mut LedgerTransaction<'_, K>,
        target: &BlockHash,
        blocks_delivered: &mut usize,
    ) -> Result<(), SyncError> {
        if target.is_zero() {
            return Err(SyncError::SentinelTarget);
        }
        if self.pending_source.is_resolved(&*txn, target) {
            log::debug!("{} is already resolved", target);
            return Ok(());
        }

        let mut in_progress = HashSet::from([*target]);
        let mut stack = Vec::new();
        self.check_depth(stack.len())?;
        stack.push(Frame::new(self.lookup(txn, target, None)?));

        while let Some(frame) = stack.last_mut() {
            match frame.next_dependency() {
                Some(dependency) => {
                    if self.pending_source.is_resolved(&*txn, &dependency) {
                        continue;
                    }
                    let dependent = frame.block.hash();
                    if dependency.is_zero() {
                        return Err(SyncError::MissingDependency {
                            block: dependency,
                            dependent: Some(dependent),
                        });
                    }
                    if !in_progress.insert(dependency) {
                        return Err(SyncError::CycleDetected { block: dependency });
                    }
                    self.check_depth(stack.len())?;
                    stack.push(Frame::new(self.lookup(txn, &dependency, Some(dependent))?));
                }
                None => {
                    if let Some(Frame { block, .. }) = stack.pop() {
                        in_progress.remove(&block.hash());
                        self.deliver(txn, block)?;
                        *blocks_delivered += 1;
                    }
                }
            }
        }

        Ok(())
    }

    fn lookup(
        &self,
        txn: &LedgerTransaction<'_, K>,
        block: &BlockHash,
        dependent: Option<BlockHash>,
    ) -> Result<Block, SyncError> {
        self.pending_source
            .lookup_pending(txn, block)?
            .ok_or(SyncError::MissingDependency {
                block: *block,
                dependent,
            })
    }

    fn check_depth(&self, in_flight: usize) -> Result<(), SyncError> {
        let limit = self.config.max_depth;
        if in_flight >= limit.int() as usize {
            Err(SyncError::DepthLimitExceeded { limit })
        } else {
            Ok(())
        }
    }

    fn deliver(&mut self, txn: &mut LedgerTransaction<'_, K>, block: Block) -> Result<(), SyncError> {
        let hash = block.hash();
        (self.consumer)(&mut *txn, &block)?;
        self.publish(Event::DeliverBlock(DeliverBlockEvent {
            timestamp: SystemTime::now(),
            block,
        }));

        self.pending_source.consume(txn, &hash);
        self.publish(Event::ConsumePending(ConsumePendingEvent {
            timestamp: SystemTime::now(),
            block: hash,
        }));

        Ok(())
    }

    fn publish(&self, event: Event) {
        if !self.event_handlers.is_empty() {
            self.event_handlers.fire_handlers(event)
        }
    }
}

/// A block whose dependencies are being resolved, and the dependencies not visited yet.
struct Frame {
    block: Block,
    dependencies: vec::IntoIter<BlockHash>,
}

impl Frame {
    fn new(block: Block) -> Self {
        let dependencies = block.dependencies().into_iter();
        Frame {
            block,
            dependencies,
        }
    }

    fn next_dependency(&mut self) -> Option<BlockHash> {
        self.dependencies.next()
    }
}

/// Reason a call to [`Synchronizer::try_synchronize`] failed.
#[derive(Debug)]
pub enum SyncError {
    /// The target was the reserved all-zero hash.
    SentinelTarget,

    /// `block` is neither resolved nor in the pending pool. `dependent` is the block that references
    /// it, or `None` if `block` is the target itself.
    MissingDependency {
        block: BlockHash,
        dependent: Option<BlockHash>,
    },

    /// More than `limit` blocks were resolving at once.
    DepthLimitExceeded { limit: SyncDepth },

    /// `block` depends, transitively, on itself.
    CycleDetected { block: BlockHash },

    /// Reading from or writing to the ledger failed, or the consumer failed.
    LedgerError(LedgerError),
}

impl SyncError {
    /// Whether this error indicates a corrupted ledger or a failing store, as opposed to a block that
    /// simply has not arrived yet.
    pub fn is_fatal(&self) -> bool {
        match self {
            SyncError::SentinelTarget | SyncError::MissingDependency { .. } => false,
            SyncError::DepthLimitExceeded { .. }
            | SyncError::CycleDetected { .. }
            | SyncError::LedgerError(_) => true,
        }
    }
}

impl From<LedgerError> for SyncError {
    fn from(value: LedgerError) -> Self {
        SyncError::LedgerError(value)
    }
}

impl From<KVGetError> for SyncError {
    fn from(value: KVGetError) -> Self {
        SyncError::LedgerError(LedgerError::KVGetError(value))
    }
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::SentinelTarget => write!(f, "target is the zero hash"),
            SyncError::MissingDependency {
                block,
                dependent: Some(dependent),
            } => write!(f, "dependency {} of {} is missing", block, dependent),
            SyncError::MissingDependency {
                block,
                dependent: None,
            } => write!(f, "block {} is missing", block),
            SyncError::DepthLimitExceeded { limit } => {
                write!(f, "more than {} blocks resolving at once", limit)
            }
            SyncError::CycleDetected { block } => write!(f, "block {} depends on itself", block),
            SyncError::LedgerError(err) => write!(f, "ledger error: {}", err),
        }
    }
}
