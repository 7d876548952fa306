//! # Station
//!
//! The check-in station as the operator sees it: a roster, a register file,
//! an optional chain export to continue from, and the prompts in between.
//! Every accepted check-in rewrites the export, so a crash between two
//! check-ins loses nothing that was confirmed on screen.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rollcall_ledger::attendance::CheckInError;
use rollcall_ledger::storage::load_chain;
use rollcall_ledger::{AttendanceRecord, Block, Chain, CheckInDesk, Register, Roster, SharedChain};

use crate::cli::StoreArgs;
use crate::prompt;

pub const ACCEPTED_MESSAGE: &str = "Data captured and saved successfully.";
pub const REJECTED_MESSAGE: &str = "Invalid Staff ID or Staff Name.";

const ID_PROMPT: &str = "Enter Staff ID: ";
const SESSION_ID_PROMPT: &str = "Enter Staff ID (blank to finish): ";
const NAME_PROMPT: &str = "Enter Staff Name: ";
const ARTIFACT_PROMPT: &str = "Artifact path (optional): ";

/// What happened to one attempted check-in.
#[derive(Debug)]
pub enum Outcome {
    Recorded(Block),
    Rejected,
}

impl Outcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, Outcome::Recorded(_))
    }
}

pub struct Station {
    desk: CheckInDesk<Roster>,
    chain_path: Option<PathBuf>,
}

impl Station {
    /// Load the roster, continue the exported chain if there is one, and
    /// open the register for appending.
    pub fn open(store: &StoreArgs) -> Result<Self> {
        let roster = Roster::load(&store.roster)
            .with_context(|| format!("failed to load roster {}", store.roster.display()))?;

        let chain = match &store.chain {
            Some(path) if path.exists() => load_chain(path)
                .with_context(|| format!("refusing to continue chain {}", path.display()))?,
            _ => Chain::create_genesis(),
        };

        let register = Register::open(&store.register)
            .with_context(|| format!("failed to open register {}", store.register.display()))?;

        tracing::info!(
            roster = roster.len(),
            blocks = chain.len(),
            register = %store.register.display(),
            "station ready"
        );

        Ok(Self {
            desk: CheckInDesk::new(roster, SharedChain::new(chain)).with_register(register),
            chain_path: store.chain.clone(),
        })
    }

    pub fn chain(&self) -> &SharedChain {
        self.desk.chain()
    }

    /// Validate and record one check-in, then report it on `output`.
    pub fn check_in<W: Write>(
        &self,
        staff_id: String,
        staff_name: String,
        artifact: Option<String>,
        output: &mut W,
    ) -> Result<Outcome> {
        let record = AttendanceRecord::now(staff_id, staff_name, artifact);
        match self.desk.check_in(record) {
            Ok(block) => {
                self.save()?;
                writeln!(output, "{}", ACCEPTED_MESSAGE)?;
                Ok(Outcome::Recorded(block))
            }
            Err(CheckInError::Rejected { .. }) => {
                writeln!(output, "{}", REJECTED_MESSAGE)?;
                Ok(Outcome::Rejected)
            }
            Err(err @ CheckInError::Register { .. }) => {
                // The block is already chained; keep the export in step with it.
                self.save()?;
                Err(err).context("check-in only partially recorded")
            }
        }
    }

    /// Prompt for whatever is missing, then check in. `None` if input ended
    /// before both values were read.
    pub fn prompt_check_in<R: BufRead, W: Write>(
        &self,
        staff_id: Option<String>,
        staff_name: Option<String>,
        artifact: Option<String>,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<Outcome>> {
        let Some(staff_id) = prompt::value_or_ask(staff_id, input, output, ID_PROMPT)? else {
            return Ok(None);
        };
        let Some(staff_name) = prompt::value_or_ask(staff_name, input, output, NAME_PROMPT)?
        else {
            return Ok(None);
        };
        self.check_in(staff_id, staff_name, artifact, output).map(Some)
    }

    /// Check in everyone entered on `input` until end of input or a blank
    /// staff ID. Each entry is an ID, a name, and an artifact path that may
    /// be left blank. Returns the number of recorded check-ins.
    pub fn run_session<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<usize> {
        let mut recorded = 0;
        loop {
            let staff_id = match prompt::ask(input, output, SESSION_ID_PROMPT)? {
                Some(id) if !id.is_empty() => id,
                _ => break,
            };
            let Some(staff_name) = prompt::ask(input, output, NAME_PROMPT)? else {
                break;
            };
            let artifact =
                prompt::ask(input, output, ARTIFACT_PROMPT)?.filter(|a| !a.is_empty());
            if self.check_in(staff_id, staff_name, artifact, output)?.is_recorded() {
                recorded += 1;
            }
        }

        self.chain()
            .verify()
            .context("chain failed verification at end of session")?;
        self.save()?;
        tracing::info!(recorded, blocks = self.chain().len(), "session closed");
        Ok(recorded)
    }

    /// Rewrite the chain export, if the station has one.
    pub fn save(&self) -> Result<()> {
        if let Some(path) = &self.chain_path {
            self.chain()
                .export()
                .write_json(path)
                .with_context(|| format!("failed to write chain export {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::tempdir;

    fn store(dir: &Path) -> StoreArgs {
        let roster = dir.join("roster.json");
        fs::write(&roster, r#"{"123":"Your record","456":"Your record"}"#).unwrap();
        StoreArgs {
            roster,
            register: dir.join("staff_register.jsonl"),
            chain: Some(dir.join("chain.json")),
        }
    }

    #[test]
    fn accepted_check_in_is_saved_everywhere() {
        let dir = tempdir().unwrap();
        let store = store(dir.path());
        let station = Station::open(&store).unwrap();

        let mut out = Vec::new();
        let outcome = station
            .check_in("123".into(), "Your record".into(), None, &mut out)
            .unwrap();
        assert!(outcome.is_recorded());
        assert_eq!(String::from_utf8(out).unwrap().trim(), ACCEPTED_MESSAGE);

        let chain = load_chain(store.chain.as_ref().unwrap()).unwrap();
        assert_eq!(chain.len(), 2);
        let rows = Register::open(&store.register).unwrap().read_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].block_hash, chain.blocks()[1].hash());
    }

    #[test]
    fn rejected_check_in_prints_message() {
        let dir = tempdir().unwrap();
        let station = Station::open(&store(dir.path())).unwrap();

        let mut out = Vec::new();
        let outcome = station
            .check_in("123".into(), "Nobody".into(), None, &mut out)
            .unwrap();
        assert!(!outcome.is_recorded());
        assert_eq!(String::from_utf8(out).unwrap().trim(), REJECTED_MESSAGE);
        assert_eq!(station.chain().len(), 1);
    }

    #[test]
    fn prompts_fill_in_missing_values() {
        let dir = tempdir().unwrap();
        let station = Station::open(&store(dir.path())).unwrap();

        let mut input = Cursor::new("Your record\n");
        let mut out = Vec::new();
        let outcome = station
            .prompt_check_in(Some("456".into()), None, None, &mut input, &mut out)
            .unwrap()
            .unwrap();
        assert!(outcome.is_recorded());
        assert!(String::from_utf8(out).unwrap().starts_with("Enter Staff Name: "));
    }

    #[test]
    fn session_stops_at_blank_id_and_continues_next_run() {
        let dir = tempdir().unwrap();
        let store = store(dir.path());

        let first = Station::open(&store).unwrap();
        let mut input = Cursor::new("123\nYour record\n\n999\nYour record\n\n\n456\n");
        let recorded = first.run_session(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(recorded, 1);

        let second = Station::open(&store).unwrap();
        assert_eq!(second.chain().len(), 2);
        let mut input = Cursor::new("456\nYour record\nphotos/456.jpg\n");
        assert_eq!(second.run_session(&mut input, &mut Vec::new()).unwrap(), 1);

        let rows = Register::open(&store.register).unwrap().read_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].record.artifact, None);
        assert_eq!(rows[1].record.artifact.as_deref(), Some("photos/456.jpg"));
        assert_eq!(load_chain(store.chain.as_ref().unwrap()).unwrap().len(), 3);
    }

    #[test]
    fn tampered_export_stops_the_station() {
        let dir = tempdir().unwrap();
        let store = store(dir.path());
        let station = Station::open(&store).unwrap();
        station
            .check_in("123".into(), "Your record".into(), None, &mut Vec::new())
            .unwrap();

        let path = store.chain.clone().unwrap();
        let text = fs::read_to_string(&path).unwrap();
        fs::write(&path, text.replace("\"123\"", "\"456\"")).unwrap();

        assert!(Station::open(&store).is_err());
    }

    #[test]
    fn missing_roster_is_an_error() {
        let dir = tempdir().unwrap();
        let mut store = store(dir.path());
        store.roster = dir.path().join("absent.json");
        let err = Station::open(&store).err().unwrap();
        assert!(format!("{:#}", err).contains("absent.json"));
    }
}
