//! Read-eval-print loop.

use std::io::{BufRead, Write};

use crate::{RunOutcome, Session};

use super::CommandError;

pub const PROMPT: &str = ">> ";

/// Evaluate `input` line by line in one session until end of input.
///
/// Results go to `output`; `puts` output goes wherever the session's print
/// handler sends it. Bad lines are reported and the loop continues.
pub fn repl<R: BufRead, W: Write>(
    session: &Session,
    input: R,
    mut output: W,
) -> Result<(), CommandError> {
    write!(output, "{PROMPT}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            write_outcome(&mut output, session.eval_source(&line))?;
        }
        write!(output, "{PROMPT}")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

fn write_outcome<W: Write>(output: &mut W, outcome: RunOutcome) -> std::io::Result<()> {
    match outcome {
        RunOutcome::Finished(value) => writeln!(output, "{value}"),
        RunOutcome::ParseFailed(errors) => {
            writeln!(output, "parser errors:")?;
            for error in errors {
                writeln!(output, "\t{error}")?;
            }
            Ok(())
        }
        RunOutcome::MacroFailed(error) => writeln!(output, "macro error: {error}"),
    }
}
