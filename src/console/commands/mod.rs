//! console::commands
//!
//! The console's command table.
//!
//! # Groups
//!
//! - [`core`] - Session housekeeping: `loadconfig`, `exthelp`, `rpchelp`, `copyright`
//! - [`extended`] - Features layered over RPC: `watchprogress`, `rpcraw`
//! - [`rpc`] - One command per daemon method in [`crate::rpc::methods::METHODS`]
//!
//! The three groups and the alias table are merged once by [`registry`]; the
//! result is never changed while the session runs.

pub mod core;
pub mod extended;
pub mod rpc;

use super::error::CommandError;
use super::help;
use super::session::Session;
use crate::core::registry::{CommandGroup, Registry, RegistryBuilder, RegistryError};

/// The registry every console session dispatches against.
pub type ConsoleRegistry = Registry<Session, CommandError>;

/// Alternate names for daemon methods.
pub const ALIASES: &[(&str, &str)] = &[
    ("getbcinfo", "getblockchaininfo"),
    ("getrawtx", "getrawtransaction"),
    ("createrawtx", "createrawtransaction"),
    ("count", "getblockcount"),
    ("blockcount", "getblockcount"),
];

/// Build the console registry.
///
/// # Errors
///
/// Fails only if two groups register the same name or an alias is broken.
pub fn registry() -> Result<ConsoleRegistry, RegistryError> {
    let extended = extended::commands();
    let extended_help = help::extended_help(&extended);

    let mut builder = RegistryBuilder::new()
        .extend(CommandGroup::Core, core::commands(extended_help))
        .extend(CommandGroup::Extended, extended)
        .extend(CommandGroup::Rpc, rpc::commands());
    for (alias, target) in ALIASES {
        builder = builder.alias(*alias, *target);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::methods::METHODS;

    #[test]
    fn registry_builds() {
        let reg = registry().unwrap();
        assert_eq!(reg.len(), METHODS.len() + 6);
        assert_eq!(reg.resolve("GetBCInfo"), "getblockchaininfo");
        assert_eq!(reg.resolve("count"), "getblockcount");
    }

    #[test]
    fn groups() {
        let reg = registry().unwrap();
        let core: Vec<&str> = reg.in_group(CommandGroup::Core).map(|c| c.name()).collect();
        assert_eq!(core, ["copyright", "exthelp", "loadconfig", "rpchelp"]);

        let extended: Vec<&str> = reg
            .in_group(CommandGroup::Extended)
            .map(|c| c.name())
            .collect();
        assert_eq!(extended, ["rpcraw", "watchprogress"]);
    }
}
