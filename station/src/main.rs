// Copyright (c) 2026 Rollcall Contributors. MIT License.
// See LICENSE for details.

//! # Rollcall Station
//!
//! Entry point for the `rollcall` binary. Parses CLI arguments, initializes
//! logging, and runs one of the subcommands:
//!
//! - `check-in` — validate and record a single check-in
//! - `session`  — record check-ins until a blank staff ID
//! - `audit`    — verify a chain export
//! - `version`  — print build version information

mod audit;
mod cli;
mod logging;
mod prompt;
mod station;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use rollcall_ledger::storage::ChainExport;

use cli::{AuditArgs, CheckInArgs, Commands, RollcallCli, SessionArgs};
use logging::LogFormat;
use station::{Outcome, Station};

/// Exit status for a rejected check-in or a chain that fails verification.
const EXIT_FAILURE: u8 = 1;

fn main() -> Result<ExitCode> {
    let cli = RollcallCli::parse();

    logging::init_logging(
        "rollcall=info,rollcall_ledger=info",
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match cli.command {
        Commands::CheckIn(args) => check_in(args),
        Commands::Session(args) => session(args),
        Commands::Audit(args) => audit_export(args),
        Commands::Version => {
            print_version();
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check_in(args: CheckInArgs) -> Result<ExitCode> {
    let station = Station::open(&args.store)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    match station.prompt_check_in(args.id, args.name, args.artifact, &mut input, &mut output)? {
        Some(Outcome::Recorded(block)) => {
            tracing::debug!(index = block.index(), "check-in complete");
            Ok(ExitCode::SUCCESS)
        }
        Some(Outcome::Rejected) => Ok(ExitCode::from(EXIT_FAILURE)),
        None => {
            writeln!(output).context("failed to write to stdout")?;
            tracing::warn!("input ended before staff ID and name were entered");
            Ok(ExitCode::from(EXIT_FAILURE))
        }
    }
}

fn session(args: SessionArgs) -> Result<ExitCode> {
    let station = Station::open(&args.store)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    let recorded = station.run_session(&mut input, &mut output)?;
    writeln!(
        output,
        "Session closed: {} check-in(s) recorded, chain of {} blocks verified.",
        recorded,
        station.chain().len()
    )?;
    Ok(ExitCode::SUCCESS)
}

fn audit_export(args: AuditArgs) -> Result<ExitCode> {
    let export = ChainExport::read_json(&args.file)
        .with_context(|| format!("failed to read chain export {}", args.file.display()))?;

    let passed = audit::report(export, args.all, &mut io::stdout().lock())
        .context("failed to write to stdout")?;
    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILURE)
    })
}

fn print_version() {
    println!("rollcall {}", env!("CARGO_PKG_VERSION"));
    println!("hash     {}", rollcall_ledger::config::HASH_ALGORITHM);
    println!("export   v{}", rollcall_ledger::config::EXPORT_FORMAT_VERSION);
}
