//! Dependency-ordered synchronization of blocks.
//!
//! # Pull and push
//!
//! A block can only be committed after every block it depends on has been committed. Synchronization
//! turns the hash of such a block into the ordered sequence of blocks that have to be handled first,
//! and delivers that sequence, target last, to a caller-supplied consumer:
//! - [**Pull**](pending::PullSource) synchronization completes blocks received from peers that are
//!   staged in the Unchecked table, typically committing each delivered block.
//! - [**Push**](pending::PushSource) synchronization walks committed blocks that are marked unsynced,
//!   typically sending each delivered block to a peer.
//!
//! Both are the same [`Synchronizer`](synchronizer::Synchronizer), parameterized by a different
//! [`PendingSource`](pending::PendingSource).

pub mod config;

pub mod pending;

pub mod synchronizer;
