//! ui::output
//!
//! Diagnostic output on stderr.
//!
//! # Design
//!
//! Command results and operator-facing messages go to the session writer.
//! Everything here is about the console itself (which settings file was
//! read, what the trust gate decided, which RPC went out) and goes to stderr
//! so it never mixes with results a script might capture.

use std::fmt::Display;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Quiet mode - errors only
    Quiet,
    /// Normal mode - errors and warnings
    #[default]
    Normal,
    /// Debug mode - also traces RPC calls and trust decisions
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags. Quiet wins over debug.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    pub fn is_debug(self) -> bool {
        self == Verbosity::Debug
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity.is_debug() {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}
