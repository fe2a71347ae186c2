//! console
//!
//! The operator console: session state, command table and the input loop.
//!
//! # Modules
//!
//! - [`session`] - Endpoint, transport, trust gate and output for one run
//! - [`commands`] - Core, extended and RPC-backed commands merged into one registry
//! - [`repl`] - Tokenize, dispatch and report, one line at a time
//! - [`input`] - Terminal and plain line sources, the non-blocking input probe
//! - [`watch`] - The `watchprogress` polling loop
//! - [`help`] - Help listings
//! - [`error`] - Command failures and their one-line reports
//! - [`testing`] - In-memory fixtures for sessions
//!
//! # Example
//!
//! ```ignore
//! let stdin = SharedReader::new(std::io::stdin());
//! let session = Session::open(settings, SessionIo::system(stdin))?;
//! let mut console = Console::new(session)?;
//! let end = console.interact(&mut TerminalSource::new())?;
//! ```

pub mod commands;
pub mod error;
pub mod help;
pub mod input;
pub mod repl;
pub mod session;
pub mod testing;
pub mod watch;

pub use commands::ConsoleRegistry;
pub use error::CommandError;
pub use input::{Input, LineSource, PlainSource, SharedReader, TerminalSource};
pub use repl::{Console, SessionEnd};
pub use session::{Session, SessionIo, SessionSettings};
