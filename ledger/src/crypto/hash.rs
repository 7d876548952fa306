//! # Hashing Utilities
//!
//! SHA-256 is the only digest in the ledger. Block hashes are stored and
//! compared as lowercase hex strings, so the hex helpers live next to the
//! digest itself.

use sha2::{Digest, Sha256};

use crate::config::HASH_HEX_LENGTH;

/// Compute the SHA-256 hash of the input data as a fixed-size array.
///
/// # Example
///
/// ```
/// use rollcall_ledger::crypto::sha256;
///
/// let hash = sha256(b"rollcall");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute SHA-256 and return the digest as 64 lowercase hex characters.
///
/// This is the form block hashes take everywhere: in memory, in exports,
/// and in the register.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// True when `s` looks like a digest produced by [`sha256_hex`]: exactly
/// 64 characters, all lowercase hex.
pub fn is_digest_hex(s: &str) -> bool {
    s.len() == HASH_HEX_LENGTH && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        // SHA-256 of the empty string.
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_deterministic() {
        let a = sha256(b"rollcall");
        let b = sha256(b"rollcall");
        assert_eq!(a, b);
    }

    #[test]
    fn test_sha256_different_inputs() {
        assert_ne!(sha256(b"rollcall"), sha256(b"Rollcall"));
    }

    #[test]
    fn hex_matches_array() {
        let arr = sha256(b"test data");
        assert_eq!(sha256_hex(b"test data"), hex::encode(arr));
    }

    #[test]
    fn digest_hex_detection() {
        assert!(is_digest_hex(&sha256_hex(b"x")));
        assert!(!is_digest_hex("0"));
        assert!(!is_digest_hex(&sha256_hex(b"x").to_uppercase()));
        assert!(!is_digest_hex(&"g".repeat(64)));
    }
}
