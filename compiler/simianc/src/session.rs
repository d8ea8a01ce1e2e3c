//! One interpreter plus the environments it keeps between inputs.

use simian_eval::{define_macros, Environment, Interpreter, MacroError, Value};
use simian_parse::{parse_source, ParseError};

/// What happened to one piece of source.
#[derive(Debug)]
pub enum RunOutcome {
    /// The program ran; the value may still be a runtime [`Value::Error`].
    Finished(Value),
    /// The source did not parse. Nothing was evaluated.
    ParseFailed(Vec<ParseError>),
    /// A macro call could not be expanded. Nothing was evaluated.
    MacroFailed(MacroError),
}

impl RunOutcome {
    /// Finished with a value that is not a runtime error.
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Finished(value) if !value.is_error())
    }
}

/// State shared by consecutive inputs, as in the REPL.
///
/// Macro bindings live in their own environment so a macro never leaks into
/// the runtime scope.
pub struct Session {
    interpreter: Interpreter,
    env: Environment,
    macro_env: Environment,
}

impl Session {
    pub fn new(interpreter: Interpreter) -> Self {
        Session {
            interpreter,
            env: Environment::new(),
            macro_env: Environment::new(),
        }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Parse, expand and evaluate `source` against this session's bindings.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn eval_source(&self, source: &str) -> RunOutcome {
        let output = parse_source(source);
        if output.has_errors() {
            return RunOutcome::ParseFailed(output.errors);
        }
        let mut program = output.program;

        define_macros(&mut program, &self.macro_env);
        if let Err(error) = self.interpreter.expand_macros(&mut program, &self.macro_env) {
            return RunOutcome::MacroFailed(error);
        }

        RunOutcome::Finished(self.interpreter.eval_program(&program, &self.env))
    }
}

/// Run `source` in a fresh session.
pub fn run_source(source: &str, interpreter: Interpreter) -> RunOutcome {
    Session::new(interpreter).eval_source(source)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use simian_eval::{buffer_handler, silent_handler};

    use super::*;

    fn session() -> Session {
        Session::new(Interpreter::with_print_handler(silent_handler()))
    }

    #[test]
    fn bindings_survive_between_inputs() {
        let session = session();
        assert!(session.eval_source("let x = 20;").is_success());
        match session.eval_source("x + 22") {
            RunOutcome::Finished(value) => assert_eq!(value, Value::Integer(42)),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn macros_survive_between_inputs() {
        let session = session();
        assert!(session
            .eval_source("let twice = macro(x) { quote(unquote(x) * 2) };")
            .is_success());
        match session.eval_source("twice(21)") {
            RunOutcome::Finished(value) => assert_eq!(value, Value::Integer(42)),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(session.env().get("twice").is_none());
    }

    #[test]
    fn parse_errors_stop_before_evaluation() {
        let print = buffer_handler();
        let outcome = run_source(
            r#"puts("ran"); let = 1;"#,
            Interpreter::with_print_handler(print.clone()),
        );
        assert!(matches!(outcome, RunOutcome::ParseFailed(ref errors) if errors.len() == 2));
        assert_eq!(print.output(), "");
    }

    #[test]
    fn macro_errors_stop_before_evaluation() {
        let print = buffer_handler();
        let outcome = run_source(
            r#"puts("ran"); let m = macro() { 1 }; m();"#,
            Interpreter::with_print_handler(print.clone()),
        );
        assert!(matches!(outcome, RunOutcome::MacroFailed(MacroError::NotQuote { .. })));
        assert!(!outcome.is_success());
        assert_eq!(print.output(), "");
    }

    #[test]
    fn runtime_errors_are_not_success() {
        let outcome = session().eval_source("1 + true");
        assert!(!outcome.is_success());
        assert!(matches!(outcome, RunOutcome::Finished(Value::Error(_))));
    }
}
