//! The `run` command: evaluate a Simian source file.

use simian_eval::{Interpreter, Value};

use super::{read_file, report_parse_errors, CommandError};
use crate::{run_source, RunOutcome};

/// Run a source file, printing the final value unless it is `null`.
///
/// `puts` output goes to stdout as the program runs. Parse errors, a failed
/// macro expansion and a final runtime error all fail the command.
pub fn run_file(path: &str) -> Result<(), CommandError> {
    let source = read_file(path)?;
    match run_source(&source, Interpreter::new()) {
        RunOutcome::Finished(Value::Error(error)) => Err(CommandError::Runtime(error)),
        RunOutcome::Finished(Value::Null) => Ok(()),
        RunOutcome::Finished(value) => {
            println!("{value}");
            Ok(())
        }
        RunOutcome::ParseFailed(errors) => Err(report_parse_errors(path, &source, &errors)),
        RunOutcome::MacroFailed(error) => Err(error.into()),
    }
}
