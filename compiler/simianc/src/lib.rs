//! Simian driver.
//!
//! Runs the full pipeline (lex, parse, define macros, expand macros,
//! evaluate) and hosts the command handlers behind the `simian` binary.

pub mod commands;
mod diagnostic;
mod session;

use std::sync::Once;

pub use diagnostic::render_parse_errors;
pub use session::{run_source, RunOutcome, Session};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=simian_eval=debug`
/// or `RUST_LOG=simian_parse=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}
