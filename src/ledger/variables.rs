/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Byte-prefixes that specify where each ledger table is stored in the user-provided key-value store.
//!
//! # List of tables
//!
//! |Table|Type|Description|
//! |---|---|---|
//! |Blocks|[`BlockHash`](crate::types::data_types::BlockHash) -> [`Block`](crate::types::block::Block)|The resolved store: every block committed to the ledger. Entries are never removed by this crate.|
//! |Unchecked|[`BlockHash`](crate::types::data_types::BlockHash) -> [`Block`](crate::types::block::Block)|Blocks received from peers that could not be committed yet because a dependency was missing. Drained by pull synchronization.|
//! |Unsynced|[`BlockHash`](crate::types::data_types::BlockHash) -> `()`|Markers over blocks that are already in Blocks but have not yet been sent to peers. Drained by push synchronization.|
//!
//! # Persistence
//!
//! Every entry is stored at a key formed by concatenating the table's one-byte prefix with the 32
//! bytes of the block hash. Block values are **Borsh-serialized**. Unsynced markers have an empty
//! value: only the presence of the key matters.

pub const BLOCKS: [u8; 1] = [0];
pub const UNCHECKED: [u8; 1] = [1];
pub const UNSYNCED: [u8; 1] = [2];

/// Concatenate two byteslices into one vector.
pub fn concat(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut res = Vec::with_capacity(a.len() + b.len());
    res.extend_from_slice(a);
    res.extend_from_slice(b);
    res
}
