//! # Shared Chain
//!
//! `append` reads the tail and then pushes a block linked to it. Two
//! unsynchronized appends could both read the same tail and fork the
//! chain, so every writer goes through one `RwLock`: appends take the
//! write lock for the whole read-tail-then-push sequence, and readers see
//! the chain either before or after an append, never in between.
//!
//! Cloning a `SharedChain` shares the same underlying chain.

use std::sync::Arc;

use parking_lot::RwLock;

use super::block::Block;
use super::chain::{Chain, IntegrityError};
use super::export::ChainExport;
use super::payload::Payload;

/// Thread-safe handle to a single chain with serialized appends.
#[derive(Debug, Clone)]
pub struct SharedChain {
    inner: Arc<RwLock<Chain>>,
}

impl SharedChain {
    pub fn new(chain: Chain) -> Self {
        Self {
            inner: Arc::new(RwLock::new(chain)),
        }
    }

    /// Append a payload and return a copy of the new block.
    pub fn append(&self, payload: Payload) -> Block {
        let mut chain = self.inner.write();
        chain.append(payload).clone()
    }

    /// Verify under the read lock.
    pub fn verify(&self) -> Result<(), IntegrityError> {
        self.inner.read().verify()
    }

    pub fn is_valid(&self) -> bool {
        self.inner.read().is_valid()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn tail(&self) -> Block {
        self.inner.read().tail().clone()
    }

    /// Copy of every block, consistent as of one moment.
    pub fn snapshot(&self) -> Vec<Block> {
        self.inner.read().blocks().to_vec()
    }

    pub fn export(&self) -> ChainExport {
        self.inner.read().export()
    }

    /// Run `f` against the chain under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Chain) -> R) -> R {
        let chain = self.inner.read();
        f(&chain)
    }
}

impl Default for SharedChain {
    fn default() -> Self {
        Self::new(Chain::create_genesis())
    }
}

impl From<Chain> for SharedChain {
    fn from(chain: Chain) -> Self {
        Self::new(chain)
    }
}
