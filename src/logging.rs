/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Functions that log out events.
//!
//! The logs defined in this module are printed if the user enabled them via the synchronizer's
//! [config](crate::sync::config::Configuration).
//!
//! This crate logs using the [log](https://docs.rs/log/latest/log/) crate. To get these messages
//! printed onto a terminal or to a file, set up a
//! [logging implementation](https://docs.rs/log/latest/log/#available-logging-implementations).
//!
//! ## Log message format
//!
//! Log messages are CSVs (Comma Separated Values) with at least two values. The first two values are
//! always:
//! 1. The name of the [event](crate::events) in PascalCase (defined in this module as constants).
//! 2. The time the event was emitted (as number of seconds since the Unix Epoch).
//!
//! The rest of the values differ depending on the kind of event. For example, the following snippet
//! is how a [DeliverBlock](crate::events::DeliverBlockEvent) is printed:
//!
//! ```text
//! DeliverBlock, 1701329264, fNGCJyk, Send
//! ```
//!
//! In the snippet:
//! - The third value is the first seven characters of the Base64 encoding of the hash of the delivered
//!   block.
//! - The fourth value is the kind of the delivered block.

use crate::events::*;
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use log;
use std::time::SystemTime;

// Names of each event in PascalCase for printing:
pub const START_SYNC: &str = "StartSync";
pub const DELIVER_BLOCK: &str = "DeliverBlock";
pub const CONSUME_PENDING: &str = "ConsumePending";
pub const END_SYNC: &str = "EndSync";
pub const SYNC_FAILURE: &str = "SyncFailure";

/// Implemented by event types. Used to get a closure that logs the event.
pub(crate) trait Logger {
    /// Returns a pointer to the default logging handler for a given event type.
    fn get_logger() -> Box<dyn Fn(&Self) + Send>;
}

impl Logger for StartSyncEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |start_sync_event: &StartSyncEvent| {
            log::info!(
                "{}, {}, {}",
                START_SYNC,
                secs_since_unix_epoch(start_sync_event.timestamp),
                first_seven_base64_chars(&start_sync_event.target.bytes())
            )
        };
        Box::new(logger)
    }
}

impl Logger for DeliverBlockEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |deliver_block_event: &DeliverBlockEvent| {
            log::info!(
                "{}, {}, {}, {:?}",
                DELIVER_BLOCK,
                secs_since_unix_epoch(deliver_block_event.timestamp),
                first_seven_base64_chars(&deliver_block_event.block.hash().bytes()),
                deliver_block_event.block.kind()
            )
        };
        Box::new(logger)
    }
}

impl Logger for ConsumePendingEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |consume_pending_event: &ConsumePendingEvent| {
            log::debug!(
                "{}, {}, {}",
                CONSUME_PENDING,
                secs_since_unix_epoch(consume_pending_event.timestamp),
                first_seven_base64_chars(&consume_pending_event.block.bytes())
            )
        };
        Box::new(logger)
    }
}

impl Logger for EndSyncEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |end_sync_event: &EndSyncEvent| {
            log::info!(
                "{}, {}, {}, {}",
                END_SYNC,
                secs_since_unix_epoch(end_sync_event.timestamp),
                first_seven_base64_chars(&end_sync_event.target.bytes()),
                end_sync_event.blocks_delivered
            )
        };
        Box::new(logger)
    }
}

impl Logger for SyncFailureEvent {
    fn get_logger() -> Box<dyn Fn(&Self) + Send> {
        let logger = |sync_failure_event: &SyncFailureEvent| {
            log::warn!(
                "{}, {}, {}, {}, {}",
                SYNC_FAILURE,
                secs_since_unix_epoch(sync_failure_event.timestamp),
                first_seven_base64_chars(&sync_failure_event.target.bytes()),
                sync_failure_event.blocks_delivered,
                sync_failure_event.reason
            )
        };
        Box::new(logger)
    }
}

// Get a more readable representation of a bytesequence by base64-encoding it and taking the first 7 characters.
pub(crate) fn first_seven_base64_chars(bytes: &[u8]) -> String {
    let encoded = STANDARD_NO_PAD.encode(bytes);
    if encoded.len() > 7 {
        encoded[0..7].to_string()
    } else {
        encoded
    }
}

fn secs_since_unix_epoch(timestamp: SystemTime) -> u64 {
    timestamp
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0)
}
