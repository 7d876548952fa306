//! # Cryptographic Primitives
//!
//! Block hashes are SHA-256, hex-encoded. Nothing here implements a
//! primitive; it wraps the `sha2` crate with the shapes the chain wants.

pub mod hash;

pub use hash::{is_digest_hex, sha256, sha256_hex};
