/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definitions for the [`Block`] type and its four kinds.
//!
//! # Dependencies
//!
//! A block can only be committed once every block it references has been committed. A block
//! references at most two others:
//! 1. `previous`: the prior block in the same account chain. Every kind except [`OpenBlock`] has one.
//! 2. `source`: a block on a *different* account chain that funds this one. Only [`OpenBlock`] and
//!    [`ReceiveBlock`] have one.
//!
//! [`Block::dependencies`] lists them in that order: `previous` first, then `source`. Synchronization
//! walks dependencies in this order, so same-chain ancestors are always delivered before cross-chain
//! ones.
//!
//! # Hashing
//!
//! A block's hash is the SHA256 digest of a one-byte kind tag followed by the kind's hashable fields.
//! The `signature` and `work` fields are not hashed: the signature is over the hash, and the work is
//! attached afterwards.

use borsh::{BorshDeserialize, BorshSerialize};

use super::crypto_primitives::{CryptoHasher, Digest, Keypair, SigningKey};
use super::data_types::{Account, Amount, BlockHash, SignatureBytes, Work};

const OPEN_TAG: u8 = 0;
const SEND_TAG: u8 = 1;
const RECEIVE_TAG: u8 = 2;
const CHANGE_TAG: u8 = 3;

/// Discriminant of a [`Block`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Open,
    Send,
    Receive,
    Change,
}

/// A content-addressed unit of change to one account chain.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum Block {
    Open(OpenBlock),
    Send(SendBlock),
    Receive(ReceiveBlock),
    Change(ChangeBlock),
}

impl Block {
    /// Get the hash that identifies this block.
    pub fn hash(&self) -> BlockHash {
        match self {
            Block::Open(block) => block.hash,
            Block::Send(block) => block.hash,
            Block::Receive(block) => block.hash,
            Block::Change(block) => block.hash,
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Open(_) => BlockKind::Open,
            Block::Send(_) => BlockKind::Send,
            Block::Receive(_) => BlockKind::Receive,
            Block::Change(_) => BlockKind::Change,
        }
    }

    /// Get the prior block in the same account chain. `None` only for open blocks.
    pub fn previous(&self) -> Option<BlockHash> {
        match self {
            Block::Open(_) => None,
            Block::Send(block) => Some(block.previous),
            Block::Receive(block) => Some(block.previous),
            Block::Change(block) => Some(block.previous),
        }
    }

    /// Get the block on another account chain that funds this one. Only open and receive blocks have
    /// a source.
    pub fn source(&self) -> Option<BlockHash> {
        match self {
            Block::Open(block) => Some(block.source),
            Block::Receive(block) => Some(block.source),
            Block::Send(_) | Block::Change(_) => None,
        }
    }

    /// Get the blocks that must be committed before this one, `previous` first, then `source`.
    pub fn dependencies(&self) -> Vec<BlockHash> {
        self.previous().into_iter().chain(self.source()).collect()
    }

    pub fn signature(&self) -> SignatureBytes {
        match self {
            Block::Open(block) => block.signature,
            Block::Send(block) => block.signature,
            Block::Receive(block) => block.signature,
            Block::Change(block) => block.signature,
        }
    }

    pub fn work(&self) -> Work {
        match self {
            Block::Open(block) => block.work,
            Block::Send(block) => block.work,
            Block::Receive(block) => block.work,
            Block::Change(block) => block.work,
        }
    }

    /// Checks that the stored hash matches the block's hashable fields.
    pub fn is_correct(&self) -> bool {
        let expected = match self {
            Block::Open(block) => {
                OpenBlock::hash(&block.source, &block.representative, &block.account)
            }
            Block::Send(block) => {
                SendBlock::hash(&block.previous, &block.destination, &block.balance)
            }
            Block::Receive(block) => ReceiveBlock::hash(&block.previous, &block.source),
            Block::Change(block) => ChangeBlock::hash(&block.previous, &block.representative),
        };
        self.hash() == expected
    }
}

impl From<OpenBlock> for Block {
    fn from(block: OpenBlock) -> Self {
        Block::Open(block)
    }
}

impl From<SendBlock> for Block {
    fn from(block: SendBlock) -> Self {
        Block::Send(block)
    }
}

impl From<ReceiveBlock> for Block {
    fn from(block: ReceiveBlock) -> Self {
        Block::Receive(block)
    }
}

impl From<ChangeBlock> for Block {
    fn from(block: ChangeBlock) -> Self {
        Block::Change(block)
    }
}

/// First block of an account chain, funded by `source`.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct OpenBlock {
    pub hash: BlockHash,
    pub source: BlockHash,
    pub representative: Account,
    pub account: Account,
    pub signature: SignatureBytes,
    pub work: Work,
}

impl OpenBlock {
    /// Create an open block for the account controlled by `signing_key`.
    pub fn new(
        source: BlockHash,
        representative: Account,
        signing_key: &SigningKey,
        work: Work,
    ) -> OpenBlock {
        let keypair = Keypair::new(signing_key);
        let account = keypair.account();
        let hash = OpenBlock::hash(&source, &representative, &account);
        OpenBlock {
            hash,
            source,
            representative,
            account,
            signature: keypair.sign(&hash),
            work,
        }
    }

    pub fn hash(source: &BlockHash, representative: &Account, account: &Account) -> BlockHash {
        let mut hasher = CryptoHasher::new();
        hasher.update([OPEN_TAG]);
        hasher.update(source.bytes());
        hasher.update(representative.bytes());
        hasher.update(account.bytes());
        BlockHash::new(hasher.finalize().into())
    }
}

/// Debits the account chain, leaving `balance` and making the difference receivable by
/// `destination`.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SendBlock {
    pub hash: BlockHash,
    pub previous: BlockHash,
    pub destination: Account,
    pub balance: Amount,
    pub signature: SignatureBytes,
    pub work: Work,
}

impl SendBlock {
    pub fn new(
        previous: BlockHash,
        destination: Account,
        balance: Amount,
        signing_key: &SigningKey,
        work: Work,
    ) -> SendBlock {
        let hash = SendBlock::hash(&previous, &destination, &balance);
        SendBlock {
            hash,
            previous,
            destination,
            balance,
            signature: Keypair::new(signing_key).sign(&hash),
            work,
        }
    }

    pub fn hash(previous: &BlockHash, destination: &Account, balance: &Amount) -> BlockHash {
        let mut hasher = CryptoHasher::new();
        hasher.update([SEND_TAG]);
        hasher.update(previous.bytes());
        hasher.update(destination.bytes());
        hasher.update(balance.int().to_le_bytes());
        BlockHash::new(hasher.finalize().into())
    }
}

/// Credits the account chain with the amount sent by `source`.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ReceiveBlock {
    pub hash: BlockHash,
    pub previous: BlockHash,
    pub source: BlockHash,
    pub signature: SignatureBytes,
    pub work: Work,
}

impl ReceiveBlock {
    pub fn new(
        previous: BlockHash,
        source: BlockHash,
        signing_key: &SigningKey,
        work: Work,
    ) -> ReceiveBlock {
        let hash = ReceiveBlock::hash(&previous, &source);
        ReceiveBlock {
            hash,
            previous,
            source,
            signature: Keypair::new(signing_key).sign(&hash),
            work,
        }
    }

    pub fn hash(previous: &BlockHash, source: &BlockHash) -> BlockHash {
        let mut hasher = CryptoHasher::new();
        hasher.update([RECEIVE_TAG]);
        hasher.update(previous.bytes());
        hasher.update(source.bytes());
        BlockHash::new(hasher.finalize().into())
    }
}

/// Changes the representative of the account chain.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ChangeBlock {
    pub hash: BlockHash,
    pub previous: BlockHash,
    pub representative: Account,
    pub signature: SignatureBytes,
    pub work: Work,
}

impl ChangeBlock {
    pub fn new(
        previous: BlockHash,
        representative: Account,
        signing_key: &SigningKey,
        work: Work,
    ) -> ChangeBlock {
        let hash = ChangeBlock::hash(&previous, &representative);
        ChangeBlock {
            hash,
            previous,
            representative,
            signature: Keypair::new(signing_key).sign(&hash),
            work,
        }
    }

    pub fn hash(previous: &BlockHash, representative: &Account) -> BlockHash {
        let mut hasher = CryptoHasher::new();
        hasher.update([CHANGE_TAG]);
        hasher.update(previous.bytes());
        hasher.update(representative.bytes());
        BlockHash::new(hasher.finalize().into())
    }
}
