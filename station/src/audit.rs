//! Reporting for the `audit` subcommand.

use std::io::{self, Write};

use rollcall_ledger::storage::ChainExport;

/// Verify `export` and write the verdict to `output`. Returns whether the
/// export passed.
///
/// With `all` set every violation is listed; otherwise only the first one.
/// Header problems and empty exports fail either way.
pub fn report<W: Write>(export: ChainExport, all: bool, output: &mut W) -> io::Result<bool> {
    let blocks = export.blocks.len();

    if !all {
        return match export.into_chain() {
            Ok(_) => {
                writeln!(output, "OK: {} blocks verified", blocks)?;
                Ok(true)
            }
            Err(err) => {
                writeln!(output, "FAILED: {}", err)?;
                Ok(false)
            }
        };
    }

    match export.audit() {
        Ok(violations) if violations.is_empty() => {
            writeln!(output, "OK: {} blocks verified", blocks)?;
            Ok(true)
        }
        Ok(violations) => {
            for violation in &violations {
                writeln!(output, "{}", violation)?;
            }
            writeln!(
                output,
                "FAILED: {} violation(s) in {} blocks",
                violations.len(),
                blocks
            )?;
            Ok(false)
        }
        Err(err) => {
            writeln!(output, "FAILED: {}", err)?;
            Ok(false)
        }
    }
}
