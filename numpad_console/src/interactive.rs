//! Interactive keypad loop
//!
//! Reads lines of key characters, feeds them to a [`PadSession`], and
//! prints the resulting status after each line.

use std::io::{BufRead, Write};

use crate::config::ConsoleError;
use crate::session::PadSession;

/// Line typed to end the session
const QUIT: &str = "q";

/// Runs the loop until `q` or end of input
///
/// Unknown characters are reported and the line is skipped; the entry is
/// left as it was.
pub fn run<R: BufRead, W: Write>(
    session: &mut PadSession,
    input: R,
    mut output: W,
) -> std::io::Result<()> {
    writeln!(output, "{}", session.status_line())?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line == QUIT {
            break;
        }

        match session.type_line(line) {
            Ok(0) => writeln!(output, "{}", session.status_line())?,
            Ok(rejected) => writeln!(
                output,
                "{}  [{} rejected]",
                session.status_line(),
                rejected
            )?,
            Err(e @ ConsoleError::UnknownKey(_)) => writeln!(output, "error: {}", e)?,
            Err(e) => return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e)),
        }
    }

    Ok(())
}
