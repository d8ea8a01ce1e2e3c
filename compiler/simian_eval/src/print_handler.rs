//! Output sink for `puts`.
//!
//! Programs print through a [`PrintHandler`] owned by the interpreter:
//! stdout for the CLI, an in-memory buffer for tests and embedders that
//! want to capture what a program wrote.

use std::sync::Arc;

use parking_lot::Mutex;

/// Where `puts` output goes.
pub enum PrintHandler {
    /// Writes to stdout.
    Stdout,
    /// Collects output in memory.
    Buffer(Mutex<String>),
    /// Discards output.
    Silent,
}

/// Print handler shared between an interpreter and whoever reads its output.
pub type SharedPrintHandler = Arc<PrintHandler>;

impl PrintHandler {
    /// Print a line (with newline).
    pub fn println(&self, msg: &str) {
        match self {
            PrintHandler::Stdout => println!("{msg}"),
            PrintHandler::Buffer(buffer) => {
                let mut buffer = buffer.lock();
                buffer.push_str(msg);
                buffer.push('\n');
            }
            PrintHandler::Silent => {}
        }
    }

    /// Everything captured so far. Empty unless this is a buffer.
    pub fn output(&self) -> String {
        match self {
            PrintHandler::Buffer(buffer) => buffer.lock().clone(),
            PrintHandler::Stdout | PrintHandler::Silent => String::new(),
        }
    }

    /// Drop captured output.
    pub fn clear(&self) {
        if let PrintHandler::Buffer(buffer) = self {
            buffer.lock().clear();
        }
    }
}

/// Handler that writes to stdout.
pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

/// Handler that captures output for later inspection.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(Mutex::new(String::new())))
}

/// Handler that discards output.
pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}
