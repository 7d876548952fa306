//! # Storage Module
//!
//! The tamper-evident chain and everything needed to hash, share and
//! export it.
//!
//! ## Architecture
//!
//! ```text
//! payload.rs   — Payload / Fields / FieldValue, the caller's data
//! canonical.rs — canonical preimage and block digest
//! block.rs     — Block structure, genesis block, hash recomputation
//! chain.rs     — Chain: append, verify, audit, rebuild from blocks
//! shared.rs    — SharedChain: single-writer lock around a Chain
//! export.rs    — JSON audit export and verified re-import
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! Payload → Block::new → Chain::append → Chain::verify
//!                            ↓
//!                      ChainExport (JSON) → load_chain → verify
//! ```
//!
//! The chain itself lives in memory. The export is the only thing written
//! to disk, and nothing is trusted on the way back in until it verifies.

pub mod block;
pub mod canonical;
pub mod chain;
pub mod export;
pub mod payload;
pub mod shared;

pub use block::Block;
pub use chain::{audit_blocks, Chain, ChainError, IntegrityError, Violation};
pub use export::{load_chain, ChainExport, ExportError};
pub use payload::{FieldValue, Fields, Payload, PayloadError};
pub use shared::SharedChain;
