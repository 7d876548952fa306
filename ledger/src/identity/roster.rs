//! # Staff Roster
//!
//! A fixed table of staff IDs and the name registered for each. A claim is
//! valid only when the ID exists and the name matches exactly.
//!
//! On disk the roster is a flat JSON object:
//!
//! ```json
//! { "123": "Your record", "456": "Your record" }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::IdentityValidator;

/// Errors raised while loading a roster.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read roster {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed roster {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Staff ID → registered name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    members: HashMap<String, String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, K, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, N)>,
        K: Into<String>,
        N: Into<String>,
    {
        Self {
            members: entries
                .into_iter()
                .map(|(id, name)| (id.into(), name.into()))
                .collect(),
        }
    }

    /// Load a roster from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let roster: Roster = serde_json::from_str(&text).map_err(|source| RosterError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), members = roster.len(), "roster loaded");
        Ok(roster)
    }

    /// Add or replace a member.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.members.insert(id.into(), name.into());
    }

    /// Registered name for `id`.
    pub fn lookup(&self, id: &str) -> Option<&str> {
        self.members.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl IdentityValidator for Roster {
    fn validate(&self, id: &str, name: &str) -> bool {
        self.lookup(id) == Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn staff() -> Roster {
        Roster::from_entries([("123", "Your record"), ("456", "Your record")])
    }

    #[test]
    fn exact_match_required() {
        let roster = staff();
        assert!(roster.validate("123", "Your record"));
        assert!(!roster.validate("123", "your record"));
        assert!(!roster.validate("123", "Your record "));
        assert!(!roster.validate("789", "Your record"));
    }

    #[test]
    fn empty_roster_refuses_everyone() {
        assert!(!Roster::new().validate("123", "Your record"));
    }

    #[test]
    fn insert_replaces_name() {
        let mut roster = staff();
        roster.insert("123", "Ada");
        assert!(roster.validate("123", "Ada"));
        assert!(!roster.validate("123", "Your record"));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roster.json");
        fs::write(&path, r#"{"123": "Your record", "456": "Your record"}"#).unwrap();

        let roster = Roster::load(&path).unwrap();
        assert_eq!(roster, staff());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roster.json");
        fs::write(&path, r#"["123"]"#).unwrap();
        assert!(matches!(Roster::load(&path), Err(RosterError::Parse { .. })));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Roster::load(dir.path().join("absent.json")),
            Err(RosterError::Io { .. })
        ));
    }

    #[test]
    fn works_through_references() {
        let roster = staff();
        let by_ref: &dyn IdentityValidator = &roster;
        assert!(by_ref.validate("456", "Your record"));
    }
}
