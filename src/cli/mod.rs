//! cli
//!
//! Command-line interface layer for sbtc.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Merge them over the console settings file
//! - Open a session and run either one command or the interactive console
//!
//! # Exit Status
//!
//! 0 when the one-shot command succeeded or the console ended with `exit` or
//! end of input; 1 for a failed or unknown one-shot command, the interrupt
//! key, or a startup error.

pub mod args;

pub use args::Cli;

use std::io;
use std::process::ExitCode;

use anyhow::Result;

use crate::console::{
    Console, PlainSource, Session, SessionIo, SessionSettings, SharedReader, TerminalSource,
};
use crate::core::config::{Config, ConfigError};
use crate::core::paths::DataDir;
use crate::editor::terminal;
use crate::ui::output::{self, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    let loaded = Config::load()?;
    for warning in &loaded.warnings {
        output::warn(
            format!("{}: {}", warning.path.display(), warning.message),
            verbosity,
        );
    }
    if let Some(path) = loaded.config.loaded_from() {
        output::debug(format!("settings loaded from {}", path.display()), verbosity);
    }

    let settings = resolve_settings(&cli, &loaded.config, verbosity)?;
    let stdin = SharedReader::new(io::stdin());
    let session = Session::open(settings, SessionIo::system(stdin.clone()))?;
    let mut console = Console::new(session)?;

    let success = if cli.is_one_shot() {
        console.run_tokens(&cli.command)?
    } else if terminal::stdin_is_terminal() {
        console.interact(&mut TerminalSource::new())?.is_success()
    } else {
        console.interact(&mut PlainSource::shared(stdin))?.is_success()
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Combine defaults, the settings file and CLI flags (later wins).
pub fn resolve_settings(
    cli: &Cli,
    config: &Config,
    verbosity: Verbosity,
) -> Result<SessionSettings, ConfigError> {
    let datadir = match cli.datadir.as_deref().or(config.datadir()) {
        Some(path) => DataDir::new(path),
        None => DataDir::default_location()?,
    };

    Ok(SessionSettings {
        datadir,
        rpc_host: config.rpc_host().to_string(),
        ignore_daemon_uid: cli.ignore_daemon_uid || config.ignore_daemon_uid(),
        watch_interval: config.watch_interval(),
        verbosity,
    })
}
