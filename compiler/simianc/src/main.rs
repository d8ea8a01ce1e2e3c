//! Simian CLI
//!
//! Tree-walking interpreter with compile-time macros.

use simian_eval::Interpreter;
use simianc::commands::{expand_file, lex_file, parse_file, repl, run_file, CommandError};
use simianc::{init_tracing, Session};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    let Some(command) = args.get(1) else {
        exit_on_error(run_repl());
        return;
    };

    let result = match command.as_str() {
        "run" | "parse" | "lex" | "expand" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: simian {command} <file>");
                std::process::exit(1);
            };
            match command.as_str() {
                "run" => run_file(path),
                "parse" => parse_file(path),
                "lex" => lex_file(path),
                _ => expand_file(path),
            }
        }
        "repl" => run_repl(),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-v" => {
            println!("Simian {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };
    exit_on_error(result);
}

fn run_repl() -> Result<(), CommandError> {
    println!("Simian {} REPL. Ctrl-D exits.", env!("CARGO_PKG_VERSION"));
    let session = Session::new(Interpreter::new());
    let stdin = std::io::stdin();
    repl(&session, stdin.lock(), std::io::stdout())
}

fn exit_on_error(result: Result<(), CommandError>) {
    if let Err(error) = result {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Simian interpreter");
    eprintln!();
    eprintln!("Usage: simian <command> [file]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <file>       Expand macros and evaluate a program");
    eprintln!("  parse <file>     Parse and print the canonical rendering");
    eprintln!("  lex <file>       Tokenize and print the token stream");
    eprintln!("  expand <file>    Print the program after macro expansion");
    eprintln!("  repl             Start an interactive session (default)");
    eprintln!("  help             Show this help message");
    eprintln!("  version          Show version information");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=simian_eval=debug) for trace output.");
}
