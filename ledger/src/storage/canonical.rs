//! # Canonical Block Encoding
//!
//! The byte sequence a block hash is computed over. Four fields, fixed
//! order:
//!
//! ```text
//! [index, "timestamp", payload, "previous_hash"]
//! ```
//!
//! encoded as a compact JSON array. The timestamp is RFC 3339 in UTC with
//! all nine fractional digits and a `Z` suffix, so every instant a stored
//! block can hold has its own preimage. The payload is its canonical
//! value (a string for markers, an insertion-ordered object for records).
//! JSON framing keeps field boundaries unambiguous, so `(1, "23")` and
//! `(12, "3")` can never produce the same preimage.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use super::payload::Payload;
use crate::crypto::sha256_hex;

/// Render a timestamp exactly as it appears in the preimage.
pub fn canonical_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Build the canonical preimage string for a block's fields.
pub fn preimage(
    index: u64,
    timestamp: &DateTime<Utc>,
    payload: &Payload,
    previous_hash: &str,
) -> String {
    let fields: Value = json!([
        index,
        canonical_timestamp(timestamp),
        payload.canonical_value(),
        previous_hash,
    ]);
    fields.to_string()
}

/// SHA-256 hex digest of the canonical preimage.
pub fn block_digest(
    index: u64,
    timestamp: &DateTime<Utc>,
    payload: &Payload,
    previous_hash: &str,
) -> String {
    sha256_hex(preimage(index, timestamp, payload, previous_hash).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::payload::Fields;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()
    }

    #[test]
    fn preimage_layout() {
        let payload = Payload::from(Fields::new().with("id", "123"));
        assert_eq!(
            preimage(1, &ts(), &payload, "abc"),
            r#"[1,"2024-03-01T08:30:00.000000000Z",{"id":"123"},"abc"]"#
        );
    }

    #[test]
    fn genesis_style_preimage() {
        assert_eq!(
            preimage(0, &ts(), &Payload::marker("Genesis Block"), "0"),
            r#"[0,"2024-03-01T08:30:00.000000000Z","Genesis Block","0"]"#
        );
    }

    #[test]
    fn field_boundaries_are_unambiguous() {
        let a = preimage(1, &ts(), &Payload::marker("23"), "x");
        let b = preimage(12, &ts(), &Payload::marker("3"), "x");
        assert_ne!(a, b);
    }

    #[test]
    fn every_field_feeds_the_digest() {
        let payload = Payload::marker("p");
        let base = block_digest(1, &ts(), &payload, "prev");
        assert_ne!(base, block_digest(2, &ts(), &payload, "prev"));
        assert_ne!(
            base,
            block_digest(1, &(ts() + chrono::Duration::seconds(1)), &payload, "prev")
        );
        assert_ne!(base, block_digest(1, &ts(), &Payload::marker("q"), "prev"));
        assert_ne!(base, block_digest(1, &ts(), &payload, "prev2"));
    }

    #[test]
    fn sub_microsecond_timestamps_differ() {
        let payload = Payload::marker("p");
        let precise = ts() + chrono::Duration::nanoseconds(999);
        assert_eq!(
            canonical_timestamp(&precise),
            "2024-03-01T08:30:00.000000999Z"
        );
        assert_ne!(
            block_digest(1, &ts(), &payload, "prev"),
            block_digest(1, &precise, &payload, "prev")
        );
    }
}
