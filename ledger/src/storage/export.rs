//! # Audit Export
//!
//! The chain consumer's view: the full ordered block sequence written as
//! JSON, with every block field kept exactly, plus a small header naming
//! the layout version and the digest. Reading an export back always
//! re-verifies the chain; a tampered file is rejected with the index of
//! the first bad block.
//!
//! Writes go to a sibling `.tmp` file which is fsync'd and renamed over
//! the target, so a crash mid-write leaves the previous export intact.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::block::Block;
use super::chain::{audit_blocks, Chain, ChainError, IntegrityError};
use crate::config::{EXPORT_FORMAT_VERSION, HASH_ALGORITHM};

/// Errors raised while reading or writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported export format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("unsupported hash algorithm {0:?}")]
    UnsupportedAlgorithm(String),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

pub type ExportResult<T> = Result<T, ExportError>;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ExportError + '_ {
    move |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Serialized form of a whole chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainExport {
    pub format_version: u32,
    pub hash_algorithm: String,
    pub exported_at: DateTime<Utc>,
    pub blocks: Vec<Block>,
}

impl ChainExport {
    /// Reject exports written in another layout or with another digest.
    fn check_header(&self) -> ExportResult<()> {
        if self.format_version != EXPORT_FORMAT_VERSION {
            return Err(ExportError::UnsupportedVersion {
                found: self.format_version,
                expected: EXPORT_FORMAT_VERSION,
            });
        }
        if self.hash_algorithm != HASH_ALGORITHM {
            return Err(ExportError::UnsupportedAlgorithm(self.hash_algorithm.clone()));
        }
        Ok(())
    }

    /// Check the header and rebuild a verified chain.
    pub fn into_chain(self) -> ExportResult<Chain> {
        self.check_header()?;
        Ok(Chain::from_blocks(self.blocks)?)
    }

    /// Every linkage violation in the exported blocks, without building a
    /// chain. The header is checked first and an export with no blocks is
    /// [`ChainError::Empty`], the same as for [`Self::into_chain`].
    pub fn audit(&self) -> ExportResult<Vec<IntegrityError>> {
        self.check_header()?;
        if self.blocks.is_empty() {
            return Err(ChainError::Empty.into());
        }
        Ok(audit_blocks(&self.blocks))
    }

    pub fn to_json_pretty(&self) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> ExportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the export as pretty JSON, creating parent directories.
    pub fn write_json(&self, path: impl AsRef<Path>) -> ExportResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let file = File::create(&tmp).map_err(io_error(&tmp))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(io_error(&tmp))?;
        writer.get_ref().sync_all().map_err(io_error(&tmp))?;
        drop(writer);

        fs::rename(&tmp, path).map_err(io_error(path))?;
        tracing::info!(path = %path.display(), blocks = self.blocks.len(), "chain exported");
        Ok(())
    }

    /// Read an export without verifying it.
    pub fn read_json(path: impl AsRef<Path>) -> ExportResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(io_error(path))?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

impl Chain {
    /// Snapshot the chain for export.
    pub fn export(&self) -> ChainExport {
        ChainExport {
            format_version: EXPORT_FORMAT_VERSION,
            hash_algorithm: HASH_ALGORITHM.to_string(),
            exported_at: Utc::now(),
            blocks: self.blocks().to_vec(),
        }
    }
}

/// Read an export and rebuild the chain, verifying every block.
pub fn load_chain(path: impl AsRef<Path>) -> ExportResult<Chain> {
    let path = path.as_ref();
    let chain = ChainExport::read_json(path)?.into_chain()?;
    tracing::info!(path = %path.display(), blocks = chain.len(), "chain loaded and verified");
    Ok(chain)
}
