//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--datadir <path>`: Daemon data directory (holds `bitcoin.conf` and `sbtc.uids`)
//! - `--ignore-daemon-uid`: Skip the daemon ownership check
//! - `--debug`: Trace RPC calls and trust decisions on stderr
//! - `--quiet` / `-q`: Errors only on stderr
//!
//! Anything after the flags is one console command, run once.

use clap::Parser;
use std::path::PathBuf;

/// sbtc - an operator console for a local bitcoind
#[derive(Parser, Debug)]
#[command(name = "sbtc")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Interactive console
    sbtc

    # One command, exit status reflects the outcome
    sbtc getblockcount
    sbtc getrawtransaction <txid> true")]
pub struct Cli {
    /// Daemon data directory [default: ~/.bitcoin]
    #[arg(long, value_name = "DIR")]
    pub datadir: Option<PathBuf>,

    /// Do not check which user started the daemon
    #[arg(long)]
    pub ignore_daemon_uid: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Command and arguments to run once instead of starting the console
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Whether a one-shot command was given.
    pub fn is_one_shot(&self) -> bool {
        !self.command.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_is_interactive() {
        let cli = Cli::try_parse_from(["sbtc"]).unwrap();
        assert!(!cli.is_one_shot());
        assert!(cli.datadir.is_none());
    }

    #[test]
    fn trailing_command_is_verbatim() {
        let cli = Cli::try_parse_from([
            "sbtc",
            "--datadir",
            "/tmp/node",
            "getblockhash",
            "-1",
            "--debug",
        ])
        .unwrap();

        assert_eq!(cli.datadir, Some(PathBuf::from("/tmp/node")));
        assert!(!cli.debug);
        assert_eq!(cli.command, ["getblockhash", "-1", "--debug"]);
    }

    #[test]
    fn flags_before_command() {
        let cli = Cli::try_parse_from(["sbtc", "-q", "--ignore-daemon-uid", "count"]).unwrap();
        assert!(cli.quiet);
        assert!(cli.ignore_daemon_uid);
        assert!(cli.is_one_shot());
    }
}
