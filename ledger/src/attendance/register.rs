//! # Attendance Register
//!
//! The human-facing table of accepted check-ins, one JSON object per line.
//! Each row carries the index and hash of the block that recorded it, so a
//! row can be matched against a chain export during an audit.
//!
//! The register is append-only; rows are never rewritten.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::record::AttendanceRecord;
use crate::storage::Block;

/// Errors raised by register I/O.
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("register I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode register row: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("malformed register row at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub type RegisterResult<T> = Result<T, RegisterError>;

/// One register row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterEntry {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub block_index: u64,
    pub block_hash: String,
}

impl RegisterEntry {
    pub fn new(record: AttendanceRecord, block: &Block) -> Self {
        Self {
            record,
            block_index: block.index(),
            block_hash: block.hash().to_string(),
        }
    }
}

/// JSON-lines register file.
#[derive(Debug, Clone)]
pub struct Register {
    path: PathBuf,
}

impl Register {
    /// Open (creating if needed) a register at `path`.
    pub fn open(path: impl AsRef<Path>) -> RegisterResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| RegisterError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| RegisterError::Io {
                path: path.clone(),
                source,
            })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row and fsync before returning.
    pub fn append(&self, entry: &RegisterEntry) -> RegisterResult<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let io = |source| RegisterError::Io {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new().append(true).open(&self.path).map_err(io)?;
        file.write_all(&line).map_err(io)?;
        file.sync_all().map_err(io)?;

        tracing::debug!(
            path = %self.path.display(),
            staff_id = %entry.record.staff_id,
            block_index = entry.block_index,
            "register row written"
        );
        Ok(())
    }

    /// Read every row. Blank lines are skipped.
    pub fn read_all(&self) -> RegisterResult<Vec<RegisterEntry>> {
        let file = File::open(&self.path).map_err(|source| RegisterError::Io {
            path: self.path.clone(),
            source,
        })?;

        let mut entries = Vec::new();
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| RegisterError::Io {
                path: self.path.clone(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line)
                .map_err(|source| RegisterError::Parse { line: i + 1, source })?;
            entries.push(entry);
        }
        Ok(entries)
    }
}
