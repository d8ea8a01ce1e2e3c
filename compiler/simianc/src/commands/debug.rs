//! Inspection commands: `lex`, `parse` and `expand`.

use simian_eval::{define_macros, silent_handler, Environment, Interpreter};
use simian_parse::parse_source;

use super::{read_file, report_parse_errors, CommandError};

/// Print one token per line: kind, literal and span.
pub fn lex_file(path: &str) -> Result<(), CommandError> {
    let source = read_file(path)?;
    let tokens = simian_lexer::lex(&source);

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in &tokens {
        println!("  {} {:?} @ {}", token.kind, token.literal, token.span);
    }
    Ok(())
}

/// Print the canonical rendering of the parsed program.
pub fn parse_file(path: &str) -> Result<(), CommandError> {
    let source = read_file(path)?;
    let output = parse_source(&source);
    if output.has_errors() {
        return Err(report_parse_errors(path, &source, &output.errors));
    }

    println!("{}", output.program);
    Ok(())
}

/// Print the program after macro definitions are removed and calls expanded.
///
/// Macro bodies run with a silent print handler.
pub fn expand_file(path: &str) -> Result<(), CommandError> {
    let source = read_file(path)?;
    let output = parse_source(&source);
    if output.has_errors() {
        return Err(report_parse_errors(path, &source, &output.errors));
    }

    let mut program = output.program;
    let env = Environment::new();
    define_macros(&mut program, &env);
    Interpreter::with_print_handler(silent_handler()).expand_macros(&mut program, &env)?;

    for stmt in &program.statements {
        println!("{stmt}");
    }
    Ok(())
}
