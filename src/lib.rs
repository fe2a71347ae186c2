//! sbtc - an operator console for a local bitcoind
//!
//! sbtc issues ad hoc JSON-RPC calls to a daemon on this host, either from
//! an interactive prompt or as a single command given on the command line.
//!
//! # Architecture
//!
//! The codebase is layered; each layer only calls downward:
//!
//! - [`cli`] - Argument parsing, settings precedence, exit status
//! - [`console`] - Session state, command table, the input loop
//! - [`editor`] - Raw-mode line editor with completion and history
//! - [`core`] - Tokenizer, registry, dispatcher, conversions, configuration
//! - [`trust`] - Daemon ownership check and the append-only trust store
//! - [`rpc`] - JSON-RPC transport abstraction (HTTP and mock)
//! - [`ui`] - Result rendering and diagnostic output
//!
//! # Invariants
//!
//! 1. The command registry is built once and never mutated afterwards
//! 2. Every RPC call passes the trust gate before reaching the transport
//! 3. Trust records are only ever appended, never rewritten
//! 4. Raw terminal mode is restored on every way out of a line read
//! 5. One failing command never ends an interactive session

pub mod cli;
pub mod console;
pub mod core;
pub mod editor;
pub mod rpc;
pub mod trust;
pub mod ui;
