/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definitions of the events emitted during synchronization, for event handling and logging.
//!
//! Note: an event for a given action indicates that the action has been completed.
//!
//! Handlers for these events are registered on a
//! [`SynchronizerSpec`](crate::sync::synchronizer::SynchronizerSpec) and are invoked synchronously,
//! on the caller's thread, in the order the events happen.

use std::time::SystemTime;

use crate::types::{block::Block, data_types::BlockHash};

pub enum Event {
    StartSync(StartSyncEvent),
    DeliverBlock(DeliverBlockEvent),
    ConsumePending(ConsumePendingEvent),
    EndSync(EndSyncEvent),
    SyncFailure(SyncFailureEvent),
}

/// A call to `synchronize` started resolving `target`.
pub struct StartSyncEvent {
    pub timestamp: SystemTime,
    pub target: BlockHash,
}

/// `block` was handed to the consumer. Every one of its dependencies was delivered or already
/// resolved before this event.
pub struct DeliverBlockEvent {
    pub timestamp: SystemTime,
    pub block: Block,
}

/// `block` was removed from the pending pool after being delivered.
pub struct ConsumePendingEvent {
    pub timestamp: SystemTime,
    pub block: BlockHash,
}

/// A call to `synchronize` finished resolving `target` successfully.
pub struct EndSyncEvent {
    pub timestamp: SystemTime,
    pub target: BlockHash,
    pub blocks_delivered: usize,
}

/// A call to `synchronize` for `target` failed. The `blocks_delivered` deliveries made before the
/// failure are not undone.
pub struct SyncFailureEvent {
    pub timestamp: SystemTime,
    pub target: BlockHash,
    pub blocks_delivered: usize,
    pub reason: String,
}
