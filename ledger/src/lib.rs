// Copyright (c) 2026 Rollcall Contributors. MIT License.
// See LICENSE for details.

//! # Rollcall Ledger — Core Library
//!
//! A tamper-evident log for attendance events. Every check-in becomes a
//! block whose SHA-256 hash covers its index, timestamp, payload and the
//! hash of the block before it. Rewriting any past record breaks the link
//! to its successor, and [`Chain::verify`] reports exactly where.
//!
//! ## Architecture
//!
//! - **crypto** — SHA-256 helpers and hex encoding of digests.
//! - **storage** — The chain itself: payloads, blocks, canonical hashing,
//!   the single-writer [`SharedChain`], and the audit export.
//! - **identity** — Who is allowed to check in ([`IdentityValidator`]).
//! - **attendance** — Attendance records, the check-in desk, and the
//!   JSON-lines register of accepted check-ins.
//! - **config** — Constants: genesis marker, sentinel hash, formats.
//!
//! ## Trust model
//!
//! The chain trusts whatever payload it receives. Identity checks happen
//! before `append`, in the desk. The chain's only job is to make later
//! edits visible.

pub mod attendance;
pub mod config;
pub mod crypto;
pub mod identity;
pub mod storage;

pub use attendance::{AttendanceRecord, CheckInDesk, CheckInError, Register, RegisterEntry};
pub use identity::{IdentityValidator, Roster};
pub use storage::{
    Block, Chain, ChainError, ChainExport, FieldValue, Fields, IntegrityError, Payload,
    SharedChain, Violation,
};
