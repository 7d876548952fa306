//! Line prompts on the operator's terminal.

use std::io::{self, BufRead, Write};

/// Print `label`, read one line, and return it trimmed of the line ending
/// and surrounding whitespace. `None` at end of input.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", label)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Use `given` if present, otherwise prompt for it.
pub fn value_or_ask<R: BufRead, W: Write>(
    given: Option<String>,
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    match given {
        Some(value) => Ok(Some(value)),
        None => ask(input, output, label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_and_trims() {
        let mut input = Cursor::new("  123 \nYour record\n");
        let mut output = Vec::new();

        assert_eq!(
            ask(&mut input, &mut output, "Enter Staff ID: ").unwrap().as_deref(),
            Some("123")
        );
        assert_eq!(
            ask(&mut input, &mut output, "Enter Staff Name: ").unwrap().as_deref(),
            Some("Your record")
        );
        assert_eq!(String::from_utf8(output).unwrap(), "Enter Staff ID: Enter Staff Name: ");
    }

    #[test]
    fn end_of_input_is_none() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert_eq!(ask(&mut input, &mut output, "> ").unwrap(), None);
    }

    #[test]
    fn given_value_skips_prompt() {
        let mut input = Cursor::new("ignored\n");
        let mut output = Vec::new();
        let value = value_or_ask(Some("456".into()), &mut input, &mut output, "> ").unwrap();
        assert_eq!(value.as_deref(), Some("456"));
        assert!(output.is_empty());
    }
}
