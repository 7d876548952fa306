//! # Check-in Desk
//!
//! Ties the collaborators together in the order a check-in must happen:
//!
//! 1. the identity validator accepts `(staff_id, staff_name)`, otherwise
//!    nothing is written anywhere;
//! 2. the record's payload is appended to the shared chain;
//! 3. the register row (with the new block's index and hash) is written.
//!
//! If step 3 fails the block is already in the chain. The chain is
//! append-only, so the error reports the block index instead of undoing
//! anything.

use super::record::AttendanceRecord;
use super::register::{Register, RegisterEntry, RegisterError};
use crate::identity::IdentityValidator;
use crate::storage::{Block, SharedChain};

/// Reasons a check-in did not complete.
#[derive(Debug, thiserror::Error)]
pub enum CheckInError {
    #[error("invalid staff ID or staff name (id {staff_id:?})")]
    Rejected { staff_id: String },

    #[error("block {block_index} recorded but register write failed: {source}")]
    Register {
        block_index: u64,
        #[source]
        source: RegisterError,
    },
}

/// Validates identities and records accepted check-ins.
#[derive(Debug)]
pub struct CheckInDesk<V> {
    validator: V,
    chain: SharedChain,
    register: Option<Register>,
}

impl<V: IdentityValidator> CheckInDesk<V> {
    pub fn new(validator: V, chain: SharedChain) -> Self {
        Self {
            validator,
            chain,
            register: None,
        }
    }

    /// Also write every accepted check-in to `register`.
    pub fn with_register(mut self, register: Register) -> Self {
        self.register = Some(register);
        self
    }

    /// Validate and record one check-in. Returns the new block.
    pub fn check_in(&self, record: AttendanceRecord) -> Result<Block, CheckInError> {
        if !self.validator.validate(&record.staff_id, &record.staff_name) {
            tracing::warn!(staff_id = %record.staff_id, "check-in rejected");
            return Err(CheckInError::Rejected {
                staff_id: record.staff_id,
            });
        }

        let block = self.chain.append(record.to_payload());
        tracing::info!(
            staff_id = %record.staff_id,
            index = block.index(),
            hash = %block.hash(),
            "check-in recorded"
        );

        if let Some(register) = &self.register {
            register
                .append(&RegisterEntry::new(record, &block))
                .map_err(|source| CheckInError::Register {
                    block_index: block.index(),
                    source,
                })?;
        }

        Ok(block)
    }

    pub fn chain(&self) -> &SharedChain {
        &self.chain
    }

    pub fn register(&self) -> Option<&Register> {
        self.register.as_ref()
    }
}
