//! console::repl
//!
//! The read-tokenize-dispatch loop.
//!
//! # Flow
//!
//! 1. Read a line from a [`LineSource`]
//! 2. Empty line → generic help
//! 3. Tokenize; an unterminated quote prints a warning and the raw tokens are used
//! 4. Dispatch; a miss prints generic help, any failure prints one line
//!
//! Only `exit`, end of input and the interrupt key leave the loop. A failing
//! command never ends an interactive session.

use std::io;

use super::commands::{self, ConsoleRegistry};
use super::error::failure_message;
use super::help;
use super::input::{Input, LineSource};
use super::session::Session;
use crate::core::registry::RegistryError;
use crate::core::tokenize::{tokenize, UNTERMINATED_QUOTE_WARNING};
use crate::editor::EditorError;
use crate::ui::output;

pub const PROMPT: &str = "> ";

/// The command that ends an interactive session.
pub const EXIT_COMMAND: &str = "exit";

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The operator typed `exit`.
    Exit,
    /// Input ran out.
    EndOfInput,
    /// The interrupt key.
    Interrupted,
}

impl SessionEnd {
    pub fn is_success(self) -> bool {
        !matches!(self, SessionEnd::Interrupted)
    }
}

/// The console: a registry and the session it dispatches into.
#[derive(Debug)]
pub struct Console {
    registry: ConsoleRegistry,
    session: Session,
    names: Vec<String>,
}

impl Console {
    /// Build the command table around `session`.
    pub fn new(session: Session) -> Result<Self, RegistryError> {
        Ok(Self::with_registry(commands::registry()?, session))
    }

    pub fn with_registry(registry: ConsoleRegistry, session: Session) -> Self {
        let names = registry.names().map(str::to_string).collect();
        Self {
            registry,
            session,
            names,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn registry(&self) -> &ConsoleRegistry {
        &self.registry
    }

    /// Print the banner, then read and run lines until the session ends.
    pub fn interact(&mut self, source: &mut dyn LineSource) -> Result<SessionEnd, EditorError> {
        self.session.say(format!(
            "sbtc v{} by gijensen",
            env!("CARGO_PKG_VERSION")
        ))?;
        self.show_help()?;

        loop {
            match source.read_line(PROMPT, &self.names)? {
                Input::Line(line) if line.trim() == EXIT_COMMAND => return Ok(SessionEnd::Exit),
                Input::Line(line) => {
                    self.run_line(&line)?;
                }
                Input::Closed => return Ok(SessionEnd::EndOfInput),
                Input::Interrupted => return Ok(SessionEnd::Interrupted),
            }
        }
    }

    /// Run one typed line. Returns whether a command ran successfully.
    pub fn run_line(&mut self, line: &str) -> io::Result<bool> {
        if line.trim().is_empty() {
            self.show_help()?;
            return Ok(false);
        }

        let outcome = tokenize(line);
        if outcome.is_unterminated() {
            self.session.say(UNTERMINATED_QUOTE_WARNING)?;
        }
        self.run_tokens(&outcome.into_tokens())
    }

    /// Run an already split command, as given on the command line.
    pub fn run_tokens(&mut self, tokens: &[String]) -> io::Result<bool> {
        match self.registry.dispatch(&mut self.session, tokens) {
            Ok(done) => {
                output::debug(format!("ran {}", done.command), self.session.verbosity());
                Ok(true)
            }
            Err(err) => {
                match failure_message(&err) {
                    Some(message) => self.session.say(message)?,
                    None => self.show_help()?,
                }
                Ok(false)
            }
        }
    }

    fn show_help(&mut self) -> io::Result<()> {
        let text = help::command_list(&self.registry);
        self.session.say(text)
    }
}
