//! # Identity Module
//!
//! Decides who may check in. The chain itself trusts every payload it is
//! given, so this check runs before anything is appended.
//!
//! - [`IdentityValidator`] — the capability: `(id, name) -> bool`.
//! - [`Roster`] — a table of staff IDs to names, loaded from JSON.

pub mod roster;

pub use roster::{Roster, RosterError};

/// Accepts or refuses an identity claim.
pub trait IdentityValidator: Send + Sync {
    /// `true` when `id` is known and `name` is the name on record for it.
    fn validate(&self, id: &str, name: &str) -> bool;
}

impl<V: IdentityValidator + ?Sized> IdentityValidator for &V {
    fn validate(&self, id: &str, name: &str) -> bool {
        (**self).validate(id, name)
    }
}

impl<V: IdentityValidator + ?Sized> IdentityValidator for std::sync::Arc<V> {
    fn validate(&self, id: &str, name: &str) -> bool {
        (**self).validate(id, name)
    }
}
