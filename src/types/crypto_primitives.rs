/*
    Copyright © 2024, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Cryptographic primitives.
//!
//! The definitions and re-exports in this module provide two categories of cryptographic primitives:
//! 1. **Cryptographic Hashes**: provided by the [`sha2`] crate.
//! 2. **Digital Signatures**: provided by the [`ed25519_dalek`] crate.

use super::data_types::{Account, BlockHash, SignatureBytes};

// re-exports below.
pub use sha2::Digest;
pub use sha2::Sha256 as CryptoHasher;

pub use ed25519_dalek::{Signature, SignatureError, Signer, SigningKey, Verifier, VerifyingKey};

/// A facade around [`SigningKey`] that signs block hashes and reports the [`Account`] that the key
/// controls.
#[derive(Clone)]
pub(crate) struct Keypair<'a>(pub(crate) &'a SigningKey);

impl<'a> Keypair<'a> {
    /// Create a `Keypair` that borrows `signing_key`.
    pub(crate) fn new(signing_key: &'a SigningKey) -> Keypair<'a> {
        Keypair(signing_key)
    }

    /// Sign the bytes of `hash`.
    pub(crate) fn sign(&self, hash: &BlockHash) -> SignatureBytes {
        SignatureBytes::new(self.0.sign(&hash.bytes()).to_bytes())
    }

    /// Get the `Account` controlled by this `Keypair`.
    pub(crate) fn account(&self) -> Account {
        Account::new(self.0.verifying_key().to_bytes())
    }
}
