//! Types that are used across the ledger and synchronization components of this crate.

pub mod block;

pub mod crypto_primitives;

pub mod data_types;
