//! # Attendance Module
//!
//! The payload producer around the chain:
//!
//! - **record** — [`AttendanceRecord`], turned into a block payload.
//! - **register** — JSON-lines table of accepted check-ins.
//! - **desk** — [`CheckInDesk`]: validate, append, register.

pub mod desk;
pub mod record;
pub mod register;

pub use desk::{CheckInDesk, CheckInError};
pub use record::AttendanceRecord;
pub use register::{Register, RegisterEntry, RegisterError};
