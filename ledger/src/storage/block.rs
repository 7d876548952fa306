//! # Block Structure
//!
//! A block is one attendance event frozen in the chain: its position, the
//! moment it was recorded, the caller's payload, and a hash link to the
//! block before it.
//!
//! ## Block Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  index: u64            (genesis = 0)         │
//! │  timestamp: DateTime<Utc> (ns precision)     │
//! │  payload: Payload                            │
//! │  previous_hash: String (tail hash, or "0")   │
//! │  hash: String          (SHA-256 hex)         │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Hash Computation
//!
//! The hash covers `index || timestamp || payload || previous_hash` via the
//! canonical preimage in [`super::canonical`]. It is computed once, in the
//! constructor, and never recomputed into the stored field. A stored hash
//! that no longer matches the other fields is evidence of tampering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::canonical::block_digest;
use super::payload::Payload;
use crate::config::{GENESIS_INDEX, GENESIS_MARKER, GENESIS_PREVIOUS_HASH};

/// One immutable record in the chain.
///
/// Fields are private: once built, a block can be read but not edited.
/// Deserialized blocks carry whatever hash they were stored with; run them
/// through [`Chain::from_blocks`](super::Chain::from_blocks) to check it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    index: u64,
    timestamp: DateTime<Utc>,
    payload: Payload,
    previous_hash: String,
    hash: String,
}

impl Block {
    /// Construct a block and compute its hash.
    ///
    /// Pure: identical inputs always produce an identical hash. The
    /// preimage records the timestamp to the nanosecond, so the stored
    /// timestamp is exactly the hashed one.
    ///
    /// The caller is responsible for `index` and `previous_hash` being
    /// consistent with the chain; [`Chain`](super::Chain) does this.
    pub fn new(
        index: u64,
        timestamp: DateTime<Utc>,
        payload: Payload,
        previous_hash: impl Into<String>,
    ) -> Self {
        let previous_hash = previous_hash.into();
        let hash = block_digest(index, &timestamp, &payload, &previous_hash);

        Block {
            index,
            timestamp,
            payload,
            previous_hash,
            hash,
        }
    }

    /// Construct the genesis block: index 0, the `"Genesis Block"` marker
    /// payload, and the `"0"` sentinel as previous hash.
    pub fn genesis(timestamp: DateTime<Utc>) -> Self {
        Block::new(
            GENESIS_INDEX,
            timestamp,
            Payload::marker(GENESIS_MARKER),
            GENESIS_PREVIOUS_HASH,
        )
    }

    /// Recompute the hash from the stored fields.
    ///
    /// Compare against [`Block::hash`] to detect tampering.
    pub fn compute_hash(&self) -> String {
        block_digest(self.index, &self.timestamp, &self.payload, &self.previous_hash)
    }

    /// True when the stored hash matches the stored fields.
    pub fn has_valid_hash(&self) -> bool {
        self.compute_hash() == self.hash
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    /// The block hash as 64 lowercase hex characters.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// True for a block shaped like genesis (index 0, sentinel link).
    pub fn is_genesis(&self) -> bool {
        self.index == GENESIS_INDEX && self.previous_hash == GENESIS_PREVIOUS_HASH
    }

    /// Test-only mutable access, used to simulate out-of-band edits.
    #[cfg(test)]
    pub(crate) fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    #[cfg(test)]
    pub(crate) fn set_hash(&mut self, hash: impl Into<String>) {
        self.hash = hash.into();
    }

    #[cfg(test)]
    pub(crate) fn set_previous_hash(&mut self, previous_hash: impl Into<String>) {
        self.previous_hash = previous_hash.into();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::is_digest_hex;
    use crate::storage::payload::Fields;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()
    }

    fn record(id: &str) -> Payload {
        Payload::from(Fields::new().with("id", id).with("name", "Your record"))
    }

    #[test]
    fn genesis_block_properties() {
        let genesis = Block::genesis(ts());
        assert_eq!(genesis.index(), 0);
        assert_eq!(genesis.previous_hash(), "0");
        assert_eq!(genesis.payload(), &Payload::marker("Genesis Block"));
        assert!(genesis.is_genesis());
        assert!(genesis.has_valid_hash());
    }

    #[test]
    fn hash_is_hex_digest() {
        let block = Block::new(1, ts(), record("123"), "0");
        assert!(is_digest_hex(block.hash()));
    }

    #[test]
    fn identical_inputs_identical_hash() {
        let a = Block::new(3, ts(), record("123"), "abc");
        let b = Block::new(3, ts(), record("123"), "abc");
        assert_eq!(a.hash(), b.hash());
        assert_eq!(a, b);
    }

    #[test]
    fn different_payload_different_hash() {
        let a = Block::new(1, ts(), record("123"), "abc");
        let b = Block::new(1, ts(), record("456"), "abc");
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn timestamp_is_kept_to_the_nanosecond() {
        let precise = ts() + chrono::Duration::nanoseconds(1_234_567);
        let block = Block::new(1, precise, record("123"), "abc");
        assert_eq!(block.timestamp().timestamp_subsec_nanos(), 1_234_567);
        assert!(block.has_valid_hash());

        let json = serde_json::to_string(&block).unwrap();
        let recovered: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered.timestamp(), precise);
        assert!(recovered.has_valid_hash());
    }

    #[test]
    fn sub_microsecond_timestamp_edit_detected() {
        let recorded = ts() + chrono::Duration::microseconds(24_306);
        let block = Block::new(1, recorded, record("123"), "abc");
        let mut doc = serde_json::to_value(&block).unwrap();
        let stored = doc["timestamp"].as_str().unwrap().to_string();
        let edited = (block.timestamp() + chrono::Duration::nanoseconds(999)).to_rfc3339();
        assert_ne!(stored, edited);
        doc["timestamp"] = serde_json::Value::String(edited);

        let tampered: Block = serde_json::from_value(doc).unwrap();
        assert_ne!(tampered.timestamp(), block.timestamp());
        assert!(!tampered.has_valid_hash());
    }

    #[test]
    fn tampered_payload_detected() {
        let mut block = Block::new(1, ts(), record("123"), "abc");
        *block.payload_mut() = record("999");
        assert!(!block.has_valid_hash());
    }

    #[test]
    fn tampered_hash_detected() {
        let mut block = Block::new(1, ts(), record("123"), "abc");
        block.set_hash("f".repeat(64));
        assert!(!block.has_valid_hash());
    }

    #[test]
    fn block_serialization_roundtrip() {
        let block = Block::new(
            7,
            ts() + chrono::Duration::microseconds(42),
            record("456"),
            "abc",
        );
        let json = serde_json::to_string(&block).expect("serialize");
        let recovered: Block = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(block, recovered);
        assert!(recovered.has_valid_hash());
    }
}
