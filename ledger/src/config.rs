//! # Ledger Configuration & Constants
//!
//! Every fixed value the chain depends on lives here. Changing any of the
//! hashing-related constants changes every block hash, so exports written
//! by an older build stop verifying.

// ---------------------------------------------------------------------------
// Genesis
// ---------------------------------------------------------------------------

/// Payload carried by the genesis block.
pub const GENESIS_MARKER: &str = "Genesis Block";

/// Previous-hash placeholder used only by the genesis block, which has no
/// real predecessor.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Index of the genesis block.
pub const GENESIS_INDEX: u64 = 0;

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// Digest used for block hashes. Written into exports and checked on import.
pub const HASH_ALGORITHM: &str = "SHA-256";

/// Digest length in bytes.
pub const HASH_OUTPUT_LENGTH: usize = 32;

/// Digest length once hex-encoded.
pub const HASH_HEX_LENGTH: usize = HASH_OUTPUT_LENGTH * 2;

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Version of the JSON audit export layout. Bump on any change to the
/// exported field set.
pub const EXPORT_FORMAT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Attendance Formats
// ---------------------------------------------------------------------------

/// Calendar date format for attendance records.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wall-clock time format for attendance records (second precision).
pub const TIME_FORMAT: &str = "%H:%M:%S";
