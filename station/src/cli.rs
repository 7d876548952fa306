//! # CLI Interface
//!
//! Defines the command-line argument structure for `rollcall` using
//! `clap` derive. Supports four subcommands: `check-in`, `session`,
//! `audit`, and `version`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Rollcall check-in station.
///
/// Validates staff against a roster, records each accepted check-in in a
/// tamper-evident hash chain, and audits exported chains.
#[derive(Parser, Debug)]
#[command(
    name = "rollcall",
    about = "Tamper-evident attendance check-in station",
    version,
    propagate_version = true
)]
pub struct RollcallCli {
    /// Log output format: "pretty" or "json".
    #[arg(long, global = true, env = "ROLLCALL_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the station binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a single check-in. Prompts for anything not given as a flag.
    CheckIn(CheckInArgs),
    /// Record check-ins from stdin until an empty staff ID or end of input.
    Session(SessionArgs),
    /// Verify a chain export and report where it breaks.
    Audit(AuditArgs),
    /// Print version information and exit.
    Version,
}

/// Where the station reads its roster and writes its records.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Staff roster (JSON object of staff ID to name).
    #[arg(long, short = 'r', env = "ROLLCALL_ROSTER", default_value = "roster.json")]
    pub roster: PathBuf,

    /// Attendance register (JSON lines, appended to).
    #[arg(long, env = "ROLLCALL_REGISTER", default_value = "staff_register.jsonl")]
    pub register: PathBuf,

    /// Chain export to continue from and rewrite after recording.
    ///
    /// When the file exists it is loaded and verified first; a chain that
    /// fails verification stops the station. Without this flag the chain
    /// lives only for the duration of the command.
    #[arg(long, short = 'c', env = "ROLLCALL_CHAIN")]
    pub chain: Option<PathBuf>,
}

/// Arguments for the `check-in` subcommand.
#[derive(Args, Debug)]
pub struct CheckInArgs {
    /// Staff ID.
    #[arg(long)]
    pub id: Option<String>,

    /// Staff name, exactly as on the roster.
    #[arg(long)]
    pub name: Option<String>,

    /// Reference to a captured artifact, e.g. a photo path.
    #[arg(long)]
    pub artifact: Option<String>,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for the `session` subcommand.
#[derive(Args, Debug)]
pub struct SessionArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for the `audit` subcommand.
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Chain export to verify.
    pub file: PathBuf,

    /// Report every violation instead of stopping at the first.
    #[arg(long)]
    pub all: bool,
}
