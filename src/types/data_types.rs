/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Types that exist only to store bytes, and do not have any major "active" behavior.

use std::fmt::{self, Debug, Display, Formatter};

use borsh::{BorshDeserialize, BorshSerialize};

/// 32-byte SHA256 hash that identifies a [`Block`](super::block::Block).
///
/// # The zero hash
///
/// The all-zero value ([`BlockHash::zero`]) is reserved. It means "no block" and is never the hash of
/// a real block, so asking to synchronize it always fails.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, BorshDeserialize, BorshSerialize)]
pub struct BlockHash([u8; 32]);

impl BlockHash {
    /// Create a new `BlockHash` wrapping `bytes`.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the reserved all-zero `BlockHash`.
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Check whether this is the reserved all-zero `BlockHash`.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Get the inner `[u8; 32]` value of this `BlockHash`.
    pub const fn bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl From<[u8; 32]> for BlockHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Display for BlockHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

impl Debug for BlockHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// Public key of an account chain.
///
/// Within this crate these are always the bytes of an ed25519
/// [`VerifyingKey`](super::crypto_primitives::VerifyingKey).
#[derive(Clone, Copy, PartialEq, Eq, Hash, BorshDeserialize, BorshSerialize)]
pub struct Account([u8; 32]);

impl Account {
    /// Create a new `Account` wrapping `bytes`.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the inner `[u8; 32]` value of this `Account`.
    pub const fn bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl Debug for Account {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Balance of an account after a [`SendBlock`](super::block::SendBlock).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, BorshDeserialize, BorshSerialize)]
pub struct Amount(u128);

impl Amount {
    /// Create a new `Amount` wrapping `int`.
    pub const fn new(int: u128) -> Self {
        Self(int)
    }

    /// Get the inner `u128` value of this `Amount`.
    pub const fn int(&self) -> u128 {
        self.0
    }
}

/// Proof-of-work nonce attached to a block. Opaque to this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, BorshDeserialize, BorshSerialize)]
pub struct Work(u64);

impl Work {
    /// Create a new `Work` wrapping `int`.
    pub const fn new(int: u64) -> Self {
        Self(int)
    }

    /// Get the inner `u64` value of this `Work`.
    pub const fn int(&self) -> u64 {
        self.0
    }
}

/// Ed25519 digital signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash, BorshDeserialize, BorshSerialize)]
pub struct SignatureBytes([u8; 64]);

impl SignatureBytes {
    /// Create a new `SignatureBytes` wrapping `bytes`.
    pub const fn new(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the inner `[u8; 64]` value of this `SignatureBytes`.
    pub const fn bytes(&self) -> [u8; 64] {
        self.0
    }
}

impl Debug for SignatureBytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Maximum number of blocks a single synchronization may have "in flight", that is, blocks whose
/// dependencies are still being resolved.
///
/// Because the dependency graph is acyclic, a well-formed ledger never reaches this limit unless a
/// chain of missing blocks is longer than it. The limit exists so that corrupted input surfaces as
/// an error instead of unbounded memory growth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SyncDepth(u32);

impl SyncDepth {
    /// The depth used when none is configured.
    pub const DEFAULT: SyncDepth = SyncDepth(1 << 20);

    /// Create a new `SyncDepth` wrapping `int`.
    pub const fn new(int: u32) -> Self {
        Self(int)
    }

    /// Get the inner `u32` value of this `SyncDepth`.
    pub const fn int(&self) -> u32 {
        self.0
    }
}

impl Default for SyncDepth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for SyncDepth {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}
