//! # Chain
//!
//! The ordered, append-only sequence of blocks. A chain is born with its
//! genesis block and only ever grows: there is no removal, no reordering,
//! and no rollback.
//!
//! ## Integrity
//!
//! [`Chain::verify`] walks every block and checks, in order:
//!
//! 1. genesis sits at index 0 with the `"0"` sentinel as previous hash;
//! 2. each block's index equals its position;
//! 3. each block's stored hash equals the hash recomputed from its fields;
//! 4. each block's `previous_hash` equals its predecessor's stored hash.
//!
//! The first failure is returned with the offending index. Nothing is ever
//! repaired.

use std::fmt;

use chrono::{DateTime, Utc};

use super::block::Block;
use super::payload::Payload;
use crate::config::GENESIS_PREVIOUS_HASH;

// ---------------------------------------------------------------------------
// Error Types
// ---------------------------------------------------------------------------

/// What went wrong at a given block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The stored hash does not match the hash of the stored fields.
    HashMismatch { stored: String, computed: String },
    /// `previous_hash` does not match the predecessor's hash.
    BrokenLink { expected: String, found: String },
    /// The block's index does not match its position in the chain.
    IndexMismatch { expected: u64, found: u64 },
    /// The first block does not carry the genesis sentinel.
    GenesisSentinel { found: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HashMismatch { stored, computed } => {
                write!(f, "hash mismatch: stored={}, computed={}", stored, computed)
            }
            Self::BrokenLink { expected, found } => write!(
                f,
                "previous_hash mismatch: expected={}, found={}",
                expected, found
            ),
            Self::IndexMismatch { expected, found } => {
                write!(f, "index mismatch: expected={}, found={}", expected, found)
            }
            Self::GenesisSentinel { found } => write!(
                f,
                "genesis previous_hash must be {:?}, found {:?}",
                GENESIS_PREVIOUS_HASH, found
            ),
        }
    }
}

/// A linkage violation, located at the first block where it shows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("chain invalid starting at block {index}: {violation}")]
pub struct IntegrityError {
    /// Position of the failing block.
    pub index: u64,
    pub violation: Violation,
}

/// Errors from building a chain out of existing blocks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("chain has no genesis block")]
    Empty,

    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

/// Ordered chain of hash-linked blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    /// Create a chain holding only a genesis block stamped with the current
    /// time.
    pub fn create_genesis() -> Self {
        Self::with_genesis_at(Utc::now())
    }

    /// Alias for [`Chain::create_genesis`].
    pub fn new() -> Self {
        Self::create_genesis()
    }

    /// Create a chain whose genesis block carries `timestamp`.
    pub fn with_genesis_at(timestamp: DateTime<Utc>) -> Self {
        let genesis = Block::genesis(timestamp);
        tracing::debug!(hash = %genesis.hash(), "genesis block created");
        Chain {
            blocks: vec![genesis],
        }
    }

    /// Rebuild a chain from blocks produced elsewhere (an export, a copy
    /// held by a consumer). The blocks must verify as a whole.
    ///
    /// # Errors
    ///
    /// [`ChainError::Empty`] if there is no genesis block,
    /// [`ChainError::Integrity`] on the first linkage violation.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, ChainError> {
        if blocks.is_empty() {
            return Err(ChainError::Empty);
        }
        let chain = Chain { blocks };
        chain.verify()?;
        Ok(chain)
    }

    /// Append a payload as a new block stamped with the current time.
    ///
    /// The wall clock is read once, here. The new block links to the
    /// current tail and becomes the new tail.
    pub fn append(&mut self, payload: Payload) -> &Block {
        self.append_at(payload, Utc::now())
    }

    /// Append a payload with a caller-supplied timestamp.
    pub fn append_at(&mut self, payload: Payload, timestamp: DateTime<Utc>) -> &Block {
        let tail = self.tail();
        let block = Block::new(tail.index() + 1, timestamp, payload, tail.hash());
        tracing::debug!(index = block.index(), hash = %block.hash(), "block appended");
        self.blocks.push(block);
        self.tail()
    }

    /// Check the whole chain. Returns the first violation found.
    pub fn verify(&self) -> Result<(), IntegrityError> {
        let result = self.violations().next().map_or(Ok(()), Err);
        if let Err(err) = &result {
            tracing::warn!(index = err.index, "{}", err);
        }
        result
    }

    /// `true` iff [`Chain::verify`] succeeds.
    pub fn is_valid(&self) -> bool {
        self.violations().next().is_none()
    }

    /// Every violation in the chain, in block order. Useful for reports;
    /// [`Chain::verify`] stops at the first.
    pub fn audit(&self) -> Vec<IntegrityError> {
        self.violations().collect()
    }

    fn violations(&self) -> impl Iterator<Item = IntegrityError> + '_ {
        violations(&self.blocks)
    }

    // -- Read views ---------------------------------------------------------

    /// All blocks, genesis first.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get(&self, index: u64) -> Option<&Block> {
        usize::try_from(index).ok().and_then(|i| self.blocks.get(i))
    }

    pub fn genesis(&self) -> &Block {
        &self.blocks[0]
    }

    /// The most recently appended block.
    pub fn tail(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    /// Number of blocks, genesis included. Never zero.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always `false`: a chain always holds its genesis block.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    #[cfg(test)]
    pub(crate) fn block_mut(&mut self, index: usize) -> &mut Block {
        &mut self.blocks[index]
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::create_genesis()
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for block in &self.blocks {
            write!(f, "{}:{}->", block.index(), &block.hash()[..8.min(block.hash().len())])?;
        }
        Ok(())
    }
}

/// Every violation in a raw block sequence, such as an export that has not
/// been turned into a [`Chain`]. An empty slice has none.
pub fn audit_blocks(blocks: &[Block]) -> Vec<IntegrityError> {
    violations(blocks).collect()
}

fn violations(blocks: &[Block]) -> impl Iterator<Item = IntegrityError> + '_ {
    blocks.iter().enumerate().flat_map(move |(position, block)| {
        let previous = position.checked_sub(1).map(|p| &blocks[p]);
        check_block(position as u64, block, previous)
    })
}

/// Checks for one block. A block can fail more than one check; they are
/// reported in the order listed in the module docs.
fn check_block(position: u64, block: &Block, previous: Option<&Block>) -> Vec<IntegrityError> {
    let mut found = Vec::new();
    let mut fail = |violation| found.push(IntegrityError { index: position, violation });

    if block.index() != position {
        fail(Violation::IndexMismatch {
            expected: position,
            found: block.index(),
        });
    }

    let computed = block.compute_hash();
    if computed != block.hash() {
        fail(Violation::HashMismatch {
            stored: block.hash().to_string(),
            computed,
        });
    }

    match previous {
        None if block.previous_hash() != GENESIS_PREVIOUS_HASH => {
            fail(Violation::GenesisSentinel {
                found: block.previous_hash().to_string(),
            });
        }
        Some(prev) if block.previous_hash() != prev.hash() => {
            fail(Violation::BrokenLink {
                expected: prev.hash().to_string(),
                found: block.previous_hash().to_string(),
            });
        }
        _ => {}
    }

    found
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
